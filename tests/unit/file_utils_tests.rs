/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use pretranslate::file_utils::FileManager;
use crate::common;

/// Test that find_files locates documents at every depth
#[test]
fn test_find_files_withNestedTree_shouldReturnAllDocuments() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test1 = common::copy_resource(temp_dir.path(), "test1.xml")?;
    let extra = temp_dir.path().join("extra_folder").join("deeper");
    fs::create_dir_all(&extra)?;
    let test2 = common::copy_resource(&extra, "test2.xml")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "not a document")?;
    common::create_test_file(temp_dir.path(), "table.csv", "a|b")?;

    let found: HashSet<PathBuf> = FileManager::find_files(temp_dir.path(), "xml")?.into_iter().collect();

    // No order is guaranteed
    assert_eq!(found, HashSet::from([test1, test2]));
    Ok(())
}

/// Test that a directory named like a document is not returned
#[test]
fn test_find_files_withDirectoryNamedXml_shouldSkipIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    fs::create_dir(temp_dir.path().join("folder.xml"))?;

    assert!(FileManager::find_files(temp_dir.path(), "xml")?.is_empty());
    Ok(())
}

/// Test that find_files fails when the root does not exist
#[test]
fn test_find_files_withMissingRoot_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(FileManager::find_files(temp_dir.path().join("missing"), "xml").is_err());
    Ok(())
}

/// Test that flatten_tree moves every document and leaves an empty source
#[test]
fn test_flatten_tree_withNestedTree_shouldMoveFilesAndEmptySource() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let old = temp_dir.path().join("old");
    let extra = old.join("extra_folder");
    fs::create_dir_all(&extra)?;
    common::copy_resource(&old, "test1.xml")?;
    common::copy_resource(&extra, "test2.xml")?;
    common::create_test_file(&extra, "readme.txt", "left behind")?;
    let new = temp_dir.path().join("new");
    fs::create_dir(&new)?;

    let stats = FileManager::flatten_tree(&old, &new, "xml")?;

    assert_eq!(stats.moved, 2);
    assert_eq!(stats.overwritten, 0);
    assert!(FileManager::file_exists(new.join("test1.xml")));
    assert!(FileManager::file_exists(new.join("test2.xml")));
    assert!(FileManager::dir_exists(&old));
    assert_eq!(fs::read_dir(&old)?.count(), 0);
    assert!(FileManager::find_files(&old, "xml")?.is_empty());
    Ok(())
}

/// Test that flatten_tree creates a missing destination
#[test]
fn test_flatten_tree_withMissingDestination_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let old = temp_dir.path().join("old");
    fs::create_dir(&old)?;
    common::copy_resource(&old, "test1.xml")?;
    let new = temp_dir.path().join("a").join("b");

    FileManager::flatten_tree(&old, &new, "xml")?;

    assert!(FileManager::file_exists(new.join("test1.xml")));
    Ok(())
}

/// Test that equally named documents collapse into one file
#[test]
fn test_flatten_tree_withDuplicateNames_shouldKeepOneFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let old = temp_dir.path().join("old");
    fs::create_dir_all(old.join("a"))?;
    fs::create_dir_all(old.join("b"))?;
    common::create_test_file(&old.join("a"), "same.xml", "a")?;
    common::create_test_file(&old.join("b"), "same.xml", "b")?;
    let new = temp_dir.path().join("new");

    let stats = FileManager::flatten_tree(&old, &new, "xml")?;

    assert_eq!(stats.moved, 2);
    assert_eq!(stats.overwritten, 1);
    assert_eq!(fs::read_dir(&new)?.count(), 1);
    let content = fs::read_to_string(new.join("same.xml"))?;
    assert!(content == "a" || content == "b");
    Ok(())
}

/// Test that a document left in the destination by an earlier batch is counted as replaced
#[test]
fn test_flatten_tree_withNameAlreadyInDestination_shouldCountOverwrite() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let old = temp_dir.path().join("old");
    fs::create_dir(&old)?;
    common::create_test_file(&old, "a.xml", "new")?;
    let new = temp_dir.path().join("new");
    fs::create_dir(&new)?;
    common::create_test_file(&new, "a.xml", "previous batch")?;

    let stats = FileManager::flatten_tree(&old, &new, "xml")?;

    assert_eq!(stats.moved, 1);
    assert_eq!(stats.overwritten, 1);
    assert_eq!(fs::read_to_string(new.join("a.xml"))?, "new");
    Ok(())
}

/// Test that flatten_tree fails without touching anything when the source is missing
#[test]
fn test_flatten_tree_withMissingSource_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let new = temp_dir.path().join("new");

    assert!(FileManager::flatten_tree(temp_dir.path().join("missing"), &new, "xml").is_err());
    assert!(!new.exists());
    Ok(())
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("test_subdir");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());
    Ok(())
}

/// Test that read_to_string reports the missing path
#[test]
fn test_read_to_string_withMissingFile_shouldMentionPath() {
    let err = FileManager::read_to_string("no_such_file.xml").unwrap_err();
    assert!(format!("{:#}", err).contains("no_such_file.xml"));
}
