#[tokio::main]
async fn main() {
    internflow_backend::run().await;
}
