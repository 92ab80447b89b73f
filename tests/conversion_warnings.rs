// tests/conversion_warnings.rs
//! Recovered conversion problems leave exactly one warning behind.

use log::{Level, LevelFilter, Log, Metadata, Record};
use notion2gutenberg::{Block, BlockConverter, BlockId, RichTextRun};
use serde_json::json;
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static CAPTURED: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Keeps each test thread's log records apart.
struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        CAPTURED.with(|captured| {
            captured
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;
static INIT: Once = Once::new();

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger installed once");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|captured| captured.borrow_mut().clear());

    let result = f();
    let warnings = CAPTURED.with(|captured| {
        captured
            .borrow()
            .iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message.clone())
            .collect()
    });
    (result, warnings)
}

#[test]
fn paragraph_without_rich_text_warns_once() {
    let block = Block::from_value(&json!({
        "id": "para-1",
        "type": "paragraph",
        "paragraph": { "color": "default" }
    }));

    let (fragment, warnings) = capture(|| BlockConverter::new().convert_block(&block));

    assert_eq!(fragment.as_deref(), Some("<p></p>"));
    assert_eq!(warnings.len(), 1, "warnings: {:?}", warnings);
    assert!(warnings[0].contains("para-1"));
    assert!(warnings[0].contains("paragraph"));
}

#[test]
fn code_without_payload_warns_once() {
    let block = Block::from_value(&json!({ "id": "code-1", "type": "code" }));

    let (fragment, warnings) = capture(|| BlockConverter::gutenberg().convert_block(&block));

    assert_eq!(fragment.as_deref(), Some("<p></p>"));
    assert_eq!(warnings.len(), 1, "warnings: {:?}", warnings);
    assert!(warnings[0].contains("code-1"));
}

#[test]
fn well_formed_blocks_are_silent() {
    let block = Block::paragraph(BlockId::parse("p").unwrap(), vec![RichTextRun::plain("ok")]);

    let (fragment, warnings) = capture(|| BlockConverter::new().convert_block(&block));

    assert_eq!(fragment.as_deref(), Some("<p>ok</p>"));
    assert!(warnings.is_empty());
}

#[test]
fn rejected_link_is_reported() {
    let block = Block::paragraph(
        BlockId::parse("p").unwrap(),
        vec![RichTextRun::plain("x").with_link("ftp://files.example.com/")],
    );

    let (fragment, warnings) = capture(|| BlockConverter::new().convert_block(&block));

    assert_eq!(fragment.as_deref(), Some("<p>x</p>"));
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ftp://files.example.com/"));
}
