use std::time::Duration;

use chrono::NaiveDate;
use futures::{StreamExt, TryStreamExt};
use moex_iss::{CandleInterval, CandlesBuilder, HistoryBuilder, IssClient, IssRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing-subscriber")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // 1. A client with a 10-second timeout.
    let client = IssClient::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    // 2. Every ticker an issuer has traded under.
    let found = moex_iss::find_securities(&client, "1-02-65104-D").await?;
    println!("--- Securities for 1-02-65104-D ---");
    for row in &found {
        println!("{:?} {:?}", row.get("secid"), row.get("regnumber"));
    }
    println!();

    // 3. A paged history, merged into one table.
    let history = HistoryBuilder::new(&client, "SNGSP")
        .board("TQBR")
        .start(NaiveDate::from_ymd_opt(2018, 1, 1).ok_or("bad date")?)
        .end(NaiveDate::from_ymd_opt(2018, 6, 1).ok_or("bad date")?)
        .fetch()
        .await?;
    println!("--- SNGSP history: {} rows ---", history.len());
    println!();

    // 4. The same kind of answer page by page, stopping early.
    let req: IssRequest = CandlesBuilder::new(&client, "SBER")
        .interval(CandleInterval::Hour)
        .request()?;
    println!("--- First two candle pages of {req} ---");
    let pages: Vec<_> = req.pages().take(2).try_collect().await?;
    for (i, page) in pages.iter().enumerate() {
        let rows = page.get("candles").map_or(0, Vec::len);
        println!("page {i}: {rows} candles");
    }

    Ok(())
}
