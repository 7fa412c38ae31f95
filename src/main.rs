use anyhow::{Context, Result};

use landmarks::view::dump;
use landmarks::{load_landmarks, AppBundle, Navigator, SharedImageStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("🗺️  Landmarks browser starting...");

    let landmarks = load_landmarks(&AppBundle).context("Failed to load landmark data")?;
    println!("✅ Loaded {} landmarks from the bundle", landmarks.len());

    let store = SharedImageStore::new(AppBundle);
    let first_id = landmarks.first().map(|l| l.id);
    let mut navigator = Navigator::new(landmarks, store.clone());

    println!("\n📋 {}", navigator.title());
    let list = navigator
        .current()
        .context("Failed to render the list screen")?;
    print!("{}", dump(&list));

    // Simulate tapping the first row
    if let Some(id) = first_id {
        navigator.activate(id);
        println!("\n📍 {}", navigator.title());
        let detail = navigator
            .current()
            .context("Failed to render the detail screen")?;
        print!("{}", dump(&detail));
    }

    println!(
        "\n🖼️  Rendered {} image variants on demand",
        store.render_count()
    );

    Ok(())
}
