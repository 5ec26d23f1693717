/*
 * Responsibility
 * - tokio runtime entry
 * - call app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    route_csrf::app::run().await
}
