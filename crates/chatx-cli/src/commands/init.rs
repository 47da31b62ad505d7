use anyhow::Result;
use chatx_config::Config;

pub fn handle(author: Option<String>) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let has_author = author.is_some();

    let path = Config::init_project(&current_dir, author)?;

    println!("✓ Created {}", path.display());
    if !has_author {
        println!("  Set `author` to the display name you want to extract");
    }

    Ok(())
}
