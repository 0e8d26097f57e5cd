use vidsrc_core::{DialogueController, Extractor, Input, SessionId};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let query = std::env::args().nth(1).unwrap_or_else(|| "Inception".to_string());
    let extractor = Extractor::new()?;

    println!("🔍 Searching '{}'...\n", query);

    let results = extractor.try_search(&query).await?;
    println!("Found {} results:", results.len());
    for (i, item) in results.iter().enumerate() {
        println!("  {}. {} ({:?}) - ID: {}", i + 1, item.title, item.kind, item.external_id);
    }

    // Walk the dialogue for the first hit
    let controller = DialogueController::new(extractor);
    let chat = SessionId(1);
    let turns = [
        Input::Start,
        Input::Text(query),
        Input::Text("1".to_string()),
        Input::Text("1".to_string()),
        Input::Text("1".to_string()),
    ];

    println!();
    for input in turns {
        let reply = controller.handle(chat, input).await;
        for message in &reply.messages {
            println!("> {}", message.trim_end());
        }
        if let Some(link) = reply.link() {
            println!("\n🎬 {}", link);
            break;
        }
        if reply.is_terminal() {
            break;
        }
    }

    Ok(())
}
