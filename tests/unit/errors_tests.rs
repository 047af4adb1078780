/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::io;

use signgloss::errors::{
    AppError, ExportError, PartialCoverageWarning, TranslationError, VocabularyError,
};

#[test]
fn test_vocabularyError_configuration_shouldNamePathAndReason() {
    let error = VocabularyError::configuration("/data/nslt_2000.json", "file does not exist");
    let message = error.to_string();
    assert!(message.contains("nslt_2000.json"));
    assert!(message.contains("file does not exist"));
}

#[test]
fn test_translationError_fromVocabularyError() {
    let error: TranslationError = VocabularyError::Empty { root: "/data/videos".into() }.into();
    assert!(matches!(error, TranslationError::Vocabulary(VocabularyError::Empty { .. })));
}

#[test]
fn test_translationError_export_shouldBeTransparent() {
    let export = ExportError::Timeout {
        tool: "ffmpeg".to_string(),
        secs: 300,
    };
    let expected = export.to_string();
    let error: TranslationError = export.into();

    assert_eq!(error.to_string(), expected);
    assert!(matches!(error, TranslationError::Export(ExportError::Timeout { secs: 300, .. })));
}

#[test]
fn test_exportError_io_shouldExposeSource() {
    let error = ExportError::Io {
        path: "/out".into(),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    };
    assert!(error.source().is_some());
}

#[test]
fn test_unresolvableContent_shouldListGlosses() {
    let error = TranslationError::UnresolvableContent {
        glosses: vec!["qqq".to_string(), "zzz".to_string()],
    };
    assert!(error.to_string().contains("qqq zzz"));
}

#[test]
fn test_partialCoverageWarning_display() {
    let warning = PartialCoverageWarning {
        coverage: 0.7,
        threshold: 0.97,
    };
    assert_eq!(warning.to_string(), "Coverage 70.0% is below the 97% threshold");
}

#[test]
fn test_appError_conversions() {
    let from_io: AppError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(_)));

    let from_anyhow: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(from_anyhow, AppError::Unknown(ref m) if m == "boom"));

    let from_translation: AppError = TranslationError::EmptyVocabulary.into();
    assert!(from_translation.to_string().starts_with("Translation error"));
}
