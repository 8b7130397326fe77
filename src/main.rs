#[tokio::main]
async fn main() -> anyhow::Result<()> {
    panel_tracker::bootstrapper::run().await
}
