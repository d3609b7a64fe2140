/// Read the response body as text.
///
/// With the `tracing` feature, the body size is logged against the URL it came from.
pub(crate) async fn get_text(resp: reqwest::Response) -> Result<String, reqwest::Error> {
    #[cfg(feature = "tracing")]
    let url = resp.url().to_string();

    let text = resp.text().await?;

    #[cfg(feature = "tracing")]
    tracing::trace!(url = %url, bytes = text.len(), "response body received");

    Ok(text)
}
