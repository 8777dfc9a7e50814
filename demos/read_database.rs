use notionapi::NotionClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let client = NotionClient::from_env()?;
    println!("Reading database: {}", client.target_db());

    let rows = client.get_database(None, None)?;
    println!("Total rows fetched: {}", rows.len());

    for row in &rows {
        println!("  playlist: {}  video: {}", row.playlist_url, row.video_url);
    }

    Ok(())
}
