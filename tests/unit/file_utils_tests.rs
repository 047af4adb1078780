/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use signgloss::file_utils::FileManager;

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Output names follow `asl_<slug>_<timestamp>.<ext>`
#[test]
fn test_generate_output_path_shouldUseSlugAndTimestamp() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/out"), "Where's the library?", "mp4");

    assert_eq!(output_path.parent(), Some(Path::new("/tmp/out")));
    let name = output_path.file_name().unwrap().to_string_lossy().to_string();
    let rest = name.strip_prefix("asl_Wheres_the_library_").expect("slug prefix");
    let timestamp = rest.strip_suffix(".mp4").expect("extension");
    assert!(timestamp.parse::<i64>().is_ok());
}

#[test]
fn test_slugify_shouldTruncateToThirtyCharacters() {
    let slug = FileManager::slugify("the quick brown fox jumps over the lazy dog");
    assert_eq!(slug, "the_quick_brown_fox_jumps_over");
    assert_eq!(slug.chars().count(), 30);
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_shouldCreateNestedDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

#[test]
fn test_find_files_shouldMatchExtensionCaseInsensitively() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    for name in ["00001.mp4", "hello.MP4", "notes.txt"] {
        fs::write(temp_dir.path().join(name), b"x")?;
    }
    fs::create_dir_all(temp_dir.path().join("sub"))?;
    fs::write(temp_dir.path().join("sub").join("deep.mp4"), b"x")?;

    let files = FileManager::find_files(temp_dir.path(), ".mp4")?;

    assert_eq!(files.len(), 2);
    assert_eq!(FileManager::count_subdirs(temp_dir.path()), 1);
    Ok(())
}

#[test]
fn test_read_phrases_shouldSkipBlankAndCommentLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "phrases.txt",
        "# greetings\nhello\n\n  thank you  \n",
    )?;

    assert_eq!(FileManager::read_phrases(&path)?, vec!["hello", "thank you"]);
    Ok(())
}
