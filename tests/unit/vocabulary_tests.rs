/*!
 * Tests for the vocabulary index and the reloadable store
 */

use anyhow::Result;
use std::fs;

use signgloss::errors::VocabularyError;
use signgloss::gloss::{AssetKind, Vocabulary, VocabularySources, VocabularyStore};

use crate::common::{self, DatasetFixture};

#[test]
fn test_build_withFixtureDataset_shouldBindFirstExistingClip() -> Result<()> {
    common::init_logging();
    let fixture = DatasetFixture::new(&["book", "thank you", "go"]).write()?;

    let vocabulary = Vocabulary::build(&fixture.sources())?;

    assert_eq!(vocabulary.len(), 3);
    let book = vocabulary.get("book").unwrap();
    assert_eq!(book.path, fixture.videos_dir().join("00001.mp4"));
    assert_eq!(book.kind, AssetKind::Video);
    assert_eq!(vocabulary.max_phrase_len(), 2);
    assert_eq!(vocabulary.keys().collect::<Vec<_>>(), vec!["book", "thank you", "go"]);
    Ok(())
}

#[test]
fn test_build_namedClips_shouldNotOverrideDatasetClips() -> Result<()> {
    let fixture = DatasetFixture::new(&["book"])
        .with_named_clips(&["book", "good morning"])
        .write()?;

    let vocabulary = Vocabulary::build(&fixture.sources())?;

    assert_eq!(
        vocabulary.get("book").unwrap().path,
        fixture.videos_dir().join("00001.mp4")
    );
    assert_eq!(
        vocabulary.get("good morning").unwrap().path,
        fixture.videos_dir().join("good_morning.mp4")
    );
    assert_eq!(vocabulary.stats().supplementary, 1);
    Ok(())
}

#[test]
fn test_build_letterImages_shouldAddSingleCharacterKeys() -> Result<()> {
    let fixture = DatasetFixture::new(&["book"]).with_letters("abc").write()?;
    // multi-character folders are not letters
    fs::create_dir_all(fixture.letters_dir().join("ab"))?;
    fs::write(fixture.letters_dir().join("ab").join("1.jpg"), b"img")?;

    let vocabulary = Vocabulary::build(&fixture.sources())?;

    assert_eq!(vocabulary.stats().letters, 3);
    assert_eq!(vocabulary.get("a").unwrap().kind, AssetKind::Image);
    assert!(!vocabulary.contains("ab"));
    Ok(())
}

#[test]
fn test_build_missingVideosDir_shouldBeConfigurationError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sources = VocabularySources::from_dataset_root(temp_dir.path());

    let result = Vocabulary::build(&sources);

    assert!(matches!(result, Err(VocabularyError::Configuration { .. })));
    Ok(())
}

#[test]
fn test_build_malformedAssociation_shouldBeConfigurationError() -> Result<()> {
    let fixture = DatasetFixture::new(&["book"]).write()?;
    fs::write(fixture.root().join("nslt_2000.json"), "{ not json")?;

    let result = Vocabulary::build(&fixture.sources());

    match result {
        Err(VocabularyError::Configuration { path, .. }) => {
            assert!(path.ends_with("nslt_2000.json"));
        }
        other => panic!("expected configuration error, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_build_noEntries_shouldBeEmptyError() -> Result<()> {
    let fixture = DatasetFixture::new(&[]).write()?;

    let result = Vocabulary::build(&fixture.sources());

    assert!(matches!(result, Err(VocabularyError::Empty { .. })));
    Ok(())
}

#[test]
fn test_build_recordsWithoutAction_shouldBeSkipped() -> Result<()> {
    let fixture = DatasetFixture::new(&["book"]).write()?;
    fs::write(
        fixture.root().join("nslt_2000.json"),
        r#"{"00007": {"subset": "train"}, "00008": {"action": []}, "00001": {"action": ["0", 1, 2]}}"#,
    )?;

    let vocabulary = Vocabulary::build(&fixture.sources())?;

    assert_eq!(vocabulary.len(), 1);
    assert!(vocabulary.contains("book"));
    Ok(())
}

#[test]
fn test_fromEntries_firstKeyWins_andKeysAreNormalized() {
    let vocabulary = Vocabulary::from_entries([
        ("Thank  You", signgloss::gloss::Asset::new("a.mp4")),
        ("thank you", signgloss::gloss::Asset::new("b.mp4")),
    ]);

    assert_eq!(vocabulary.len(), 1);
    assert_eq!(vocabulary.get("thank you").unwrap().path.to_string_lossy(), "a.mp4");
}

#[test]
fn test_emptyVocabulary_maxPhraseLen_shouldBeOne() {
    assert_eq!(Vocabulary::default().max_phrase_len(), 1);
}

#[test]
fn test_store_reload_shouldSwapSnapshotAndKeepOldOnFailure() -> Result<()> {
    let fixture = DatasetFixture::new(&["book"]).write()?;
    let store = VocabularyStore::load(fixture.sources())?;
    let before = store.snapshot();
    assert_eq!(before.len(), 1);

    fs::write(fixture.videos_dir().join("hello.mp4"), b"clip")?;
    assert_eq!(store.reload()?, 2);
    assert_eq!(store.snapshot().len(), 2);
    // the earlier snapshot is untouched
    assert_eq!(before.len(), 1);

    fs::remove_file(fixture.root().join("wlasl_class_list.txt"))?;
    assert!(store.reload().is_err());
    assert_eq!(store.snapshot().len(), 2);
    Ok(())
}
