//! The ISS reference directory: engines, markets, boards and other values
//! that fill the placeholders of endpoint URLs.

use crate::core::{IssClient, IssError, IssRequest, Table};
use crate::query::{IssQuery, Mode, fetch_table, request};

/// A placeholder that appears in ISS URL templates such as
/// `/iss/engines/[engine]/markets/[market]/boards/[board]/securities`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// Trading systems (`stock`, `currency`, ...).
    Engines,
    /// Markets of every engine.
    Markets,
    /// Trading boards (`TQBR`, ...).
    #[default]
    Boards,
    /// Groups of boards.
    BoardGroups,
    /// Candle durations.
    Durations,
    /// Security types.
    SecurityTypes,
    /// Security groups.
    SecurityGroups,
    /// Security collections.
    SecurityCollections,
}

impl Placeholder {
    /// The table name ISS uses for this placeholder in `index.json`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Engines => "engines",
            Self::Markets => "markets",
            Self::Boards => "boards",
            Self::BoardGroups => "boardgroups",
            Self::Durations => "durations",
            Self::SecurityTypes => "securitytypes",
            Self::SecurityGroups => "securitygroups",
            Self::SecurityCollections => "securitycollections",
        }
    }
}

/// Lists the values a placeholder can take.
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn get_reference(client: &IssClient, placeholder: Placeholder) -> Result<Table, IssError> {
    ReferenceBuilder::new(client).placeholder(placeholder).fetch().await
}

/// A builder for the ISS reference directory (`index.json`).
#[derive(Debug, Clone)]
pub struct ReferenceBuilder {
    client: IssClient,
    placeholder: Placeholder,
}

impl ReferenceBuilder {
    /// Creates a builder for the default placeholder (`boards`).
    pub fn new(client: &IssClient) -> Self {
        Self {
            client: client.clone(),
            placeholder: Placeholder::default(),
        }
    }

    /// Selects which placeholder values to list.
    #[must_use]
    pub const fn placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        request(&self.client, &["index.json"], &IssQuery::new())
    }

    /// Loads the reference table.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(placeholder = self.placeholder.as_str())))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, self.placeholder.as_str(), Mode::Single).await
    }
}
