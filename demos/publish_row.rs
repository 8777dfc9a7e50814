use notionapi::{NotionClient, PropertyKind};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let client = NotionClient::from_env()?;
    println!("Publishing a row to database: {}", client.target_db());

    let mut row = client.new_row();
    row.add_property("Title", "Video title", PropertyKind::Title, None, false)?;
    row.add_property("Link", "https://ya.ru", PropertyKind::Url, None, false)?;
    row.add_property(
        "Playlist",
        "Watch later",
        PropertyKind::RichText,
        Some("https://www.youtube.com/playlist?list=WL"),
        false,
    )?;

    client.publish_row(&mut row, true, true)?;
    println!("Row published, staging area reset: {}", row.is_empty());

    Ok(())
}
