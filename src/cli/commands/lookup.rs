//! Song-info lookup command.

use anyhow::Context;

use crate::config::Config;
use crate::library::split_couplets;
use crate::model::DATE_FORMAT;
use crate::songinfo::SongInfoClient;

/// Fetch song info for one song and print it
pub async fn cmd_lookup(config: &Config, song: &str, group: &str) -> anyhow::Result<()> {
    let client = SongInfoClient::new(&config.song_info).context("build song-info client")?;

    println!("Looking up \"{}\" by {}...", song, group);
    let info = client
        .get_song_info(song, group)
        .await
        .with_context(|| format!("look up \"{}\" by {}", song, group))?;

    let couplets = split_couplets(&info.text);
    println!("Release date: {}", info.release_date.format(DATE_FORMAT));
    println!("Link:         {}", info.link);
    println!("Couplets:     {}", couplets.len());
    for (i, couplet) in couplets.iter().enumerate() {
        println!("\n[{}]\n{}", i + 1, couplet);
    }

    Ok(())
}
