#![forbid(unsafe_code)]
#![cfg(feature = "file-store")]

//! Kit persistence through the JSON-file backend.
//!
//! Run:
//!   cargo test -p emojikit --features file-store --test file_store_kit

use std::rc::Rc;

use emojikit::{Catalogue, EmojiEntry, EmojiKit, FileStore, KeyValueStore, SupportLevel};
use emojikit_detect::ScriptedProbe;
use tempfile::TempDir;

fn catalogue() -> Catalogue {
    Catalogue::from_groups([(
        "Animals & Nature",
        vec![
            EmojiEntry::new("🦄", "unicorn", false),
            EmojiEntry::new("🫎", "moose", false),
        ],
    )])
}

#[test]
fn state_survives_process_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");

    {
        let store = Rc::new(FileStore::new(&path));
        let mut kit =
            EmojiKit::new(catalogue(), ScriptedProbe::default().with_blank("🫎"), store).unwrap();
        assert!(kit.select("🦄"));
    }

    let store = Rc::new(FileStore::new(&path));
    let mut kit =
        EmojiKit::new(catalogue(), ScriptedProbe::default(), Rc::clone(&store) as _).unwrap();
    assert_eq!(kit.list_favorites().len(), 1);
    assert_eq!(kit.classify("🫎"), SupportLevel::NotSupported);
    assert_eq!(kit.classifier().probe().render_calls(), 0);

    kit.reset_stored_data().unwrap();
    assert!(store.keys().unwrap().is_empty());
}
