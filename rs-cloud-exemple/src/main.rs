use rs_cloud_core::io::read_text;
use rs_cloud_core::model::frequency::count;
use rs_cloud_core::model::layout::{layout, select_top};
use rs_cloud_core::model::session::Session;
use rs_cloud_core::model::transition::Stage;
use rs_cloud_core::CloudConfig;

const SAMPLE: &str = "Rust is a language empowering everyone to build reliable and efficient software. \
    Rust is fast, Rust is memory-efficient: with no runtime or garbage collector. \
    Rust has great documentation, a friendly compiler and a friendly community.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Configuration comes from the file named by RS_CLOUD_CONFIG, if any
    let config = CloudConfig::from_env()?;

    // First argument is a text file; the built-in sample is used otherwise
    let text = match std::env::args().nth(1) {
        Some(path) => read_text(path)?,
        None => SAMPLE.to_owned(),
    };

    // A session keeps the text and the table between generations;
    // its stop words are the English list plus the configured extras
    let mut session = Session::with_config(&config);

    // Counting is a pure function of the text and the stop words
    let table = count(&text, session.stop_words());
    println!("{} distinct words, {} counted tokens", table.len(), table.total());

    // The most frequent words, ties kept in reading order
    for word in select_top(&table, config.layout.top_k) {
        println!("#{} {} x{}", word.rank + 1, word.word, word.count);
    }

    // Layout is a pure function of the table and the viewport
    for glyph in layout(&table, &config.viewport, &config.layout) {
        println!("{:>12} size {:>5.1} at ({:>6.1}, {:>5.1})", glyph.word, glyph.font_size, glyph.x, glyph.y);
    }

    // The stage tells which words enter, stay or leave
    let mut stage = Stage::new(config.durations);

    session.set_text(text.as_str());
    let first = session.generate();
    let reconciliation = stage.apply(&first.glyphs, 0.0);
    println!("Revision {}: entered {:?}", first.revision, reconciliation.entered);

    session.set_text("Cats chase cats. Cats run. Rust is friendly.");
    let second = session.generate();
    let reconciliation = stage.apply(&second.glyphs, 1.0);
    println!(
        "Revision {}: entered {:?}, updated {:?}, exited {:?}",
        second.revision, reconciliation.entered, reconciliation.updated, reconciliation.exited
    );

    // Exiting words stay on stage until their animation is over
    println!("Removed after fading out: {:?}", stage.prune(2.0));

    // Text made only of stop words clears the cloud at once
    session.set_text("the a an of");
    let third = session.generate();
    let reconciliation = stage.apply(&third.glyphs, 3.0);
    println!("Revision {}: cleared {:?}", third.revision, reconciliation.exited);

    Ok(())
}
