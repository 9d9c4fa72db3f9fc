//! File attachment staging
//!
//! Files are validated and held locally until submission; nothing is uploaded
//! here. A batch is admitted whole or not at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Default cap on staged files
pub const DEFAULT_MAX_FILES: usize = 10;
/// Default per-file size cap in megabytes
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 10;

/// MIME types accepted for staging
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("Maximum {max} files allowed.")]
    TooManyFiles { max: usize },
    #[error("File \"{name}\" is too large. Maximum size is {max_mb}MB.")]
    FileTooLarge { name: String, max_mb: u64 },
    #[error("File type \"{mime_type}\" is not supported.")]
    UnsupportedType { mime_type: String },
    #[error("Could not read \"{path}\"")]
    Unreadable { path: String },
    #[error("Could not read the file list. Check for an unclosed quote.")]
    MalformedPathList,
}

/// A file the user picked, before it is admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileCandidate {
    /// Resolve a path on disk into a candidate (size from metadata, type from
    /// the extension)
    pub fn from_path(path: &Path) -> Result<Self, AttachmentError> {
        let unreadable = || AttachmentError::Unreadable {
            path: path.display().to_string(),
        };
        let metadata = std::fs::metadata(path).map_err(|_| unreadable())?;
        if !metadata.is_file() {
            return Err(unreadable());
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(unreadable)?;
        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
            mime_type: guess_mime_type(path),
        })
    }
}

/// MIME type from the file extension; empty when unknown
pub fn guess_mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .map(str::to_string)
        .unwrap_or_default()
}

/// Split user input (typed or pasted) into paths. Entries follow shell
/// quoting rules; `file://` URIs, as terminals deliver on drag-and-drop, are
/// decoded to local paths.
pub fn parse_path_list(input: &str) -> Result<Vec<PathBuf>, AttachmentError> {
    let words = shlex::split(input).ok_or(AttachmentError::MalformedPathList)?;
    Ok(words.iter().map(|w| resolve_entry(w)).collect())
}

fn resolve_entry(entry: &str) -> PathBuf {
    if entry.starts_with("file://") {
        if let Some(path) = Url::parse(entry).ok().and_then(|u| u.to_file_path().ok()) {
            return path;
        }
    }
    PathBuf::from(entry)
}

/// Rough category used for the list icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Pdf,
    Other,
}

/// A file admitted into the staged set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedAttachment {
    pub id: String,
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl StagedAttachment {
    pub fn kind(&self) -> AttachmentKind {
        if self.mime_type.starts_with("image/") {
            AttachmentKind::Image
        } else if self.mime_type == "application/pdf" {
            AttachmentKind::Pdf
        } else {
            AttachmentKind::Other
        }
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// Human-readable size, base 1024, up to two decimals
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// Limits applied to every batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentLimits {
    pub max_files: usize,
    pub max_size_mb: u64,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
        }
    }
}

impl AttachmentLimits {
    fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(1024 * 1024)
    }

    fn check(&self, candidate: &FileCandidate) -> Result<(), AttachmentError> {
        if candidate.size > self.max_size_bytes() {
            return Err(AttachmentError::FileTooLarge {
                name: candidate.name.clone(),
                max_mb: self.max_size_mb,
            });
        }
        if !ALLOWED_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
            return Err(AttachmentError::UnsupportedType {
                mime_type: candidate.mime_type.clone(),
            });
        }
        Ok(())
    }

    /// Admit a batch. Returns `staged` followed by the new entries, or the
    /// error of the first offending candidate with nothing admitted.
    pub fn add_files(
        &self,
        staged: &[StagedAttachment],
        candidates: Vec<FileCandidate>,
    ) -> Result<Vec<StagedAttachment>, AttachmentError> {
        if staged.len() + candidates.len() > self.max_files {
            return Err(AttachmentError::TooManyFiles {
                max: self.max_files,
            });
        }

        for candidate in &candidates {
            self.check(candidate)?;
        }

        let mut next = staged.to_vec();
        next.extend(candidates.into_iter().map(|c| StagedAttachment {
            id: Uuid::new_v4().to_string(),
            path: c.path,
            name: c.name,
            size: c.size,
            mime_type: c.mime_type,
        }));
        Ok(next)
    }
}

/// Staged list without the entry `id`
pub fn remove_file(staged: &[StagedAttachment], id: &str) -> Vec<StagedAttachment> {
    staged.iter().filter(|f| f.id != id).cloned().collect()
}

/// Staged attachments plus the single outstanding attachment error
#[derive(Debug, Clone, Default)]
pub struct AttachmentStager {
    pub limits: AttachmentLimits,
    files: Vec<StagedAttachment>,
    error: Option<AttachmentError>,
}

impl AttachmentStager {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self {
            limits,
            files: Vec::new(),
            error: None,
        }
    }

    pub fn files(&self) -> &[StagedAttachment] {
        &self.files
    }

    pub fn error(&self) -> Option<&AttachmentError> {
        self.error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Stage already-resolved candidates. Returns how many were admitted.
    pub fn add_candidates(&mut self, candidates: Vec<FileCandidate>) -> usize {
        self.error = None;
        let count = candidates.len();
        match self.limits.add_files(&self.files, candidates) {
            Ok(files) => {
                tracing::debug!("Staged {count} attachment(s)");
                self.files = files;
                count
            }
            Err(e) => {
                tracing::debug!("Rejected attachment batch: {e}");
                self.error = Some(e);
                0
            }
        }
    }

    /// Stage paths from the browse input or a paste. Both input paths go
    /// through here so they share validation.
    pub fn add_paths(&mut self, paths: &[PathBuf]) -> usize {
        if paths.is_empty() {
            return 0;
        }
        let candidates: Result<Vec<_>, _> =
            paths.iter().map(|p| FileCandidate::from_path(p)).collect();
        match candidates {
            Ok(candidates) => self.add_candidates(candidates),
            Err(e) => {
                self.error = Some(e);
                0
            }
        }
    }

    /// Parse typed or pasted text and stage the paths it names
    pub fn add_input(&mut self, text: &str) -> usize {
        match parse_path_list(text) {
            Ok(paths) => self.add_paths(&paths),
            Err(e) => {
                tracing::debug!("Rejected attachment input: {e}");
                self.error = Some(e);
                0
            }
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.files = remove_file(&self.files, id);
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MB: u64 = 1024 * 1024;

    fn candidate(name: &str, size: u64, mime: &str) -> FileCandidate {
        FileCandidate {
            path: PathBuf::from(format!("/tmp/{name}")),
            name: name.to_string(),
            size,
            mime_type: mime.to_string(),
        }
    }

    fn pngs(count: usize) -> Vec<FileCandidate> {
        (0..count)
            .map(|i| candidate(&format!("shot-{i}.png"), 1_000, "image/png"))
            .collect()
    }

    mod add_files {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_eleven_files_rejected_whole() {
            let limits = AttachmentLimits::default();
            let err = limits.add_files(&[], pngs(11)).unwrap_err();
            assert_eq!(err, AttachmentError::TooManyFiles { max: 10 });
            assert_eq!(err.to_string(), "Maximum 10 files allowed.");
        }

        #[test]
        fn test_count_includes_already_staged() {
            let limits = AttachmentLimits::default();
            let staged = limits.add_files(&[], pngs(8)).unwrap();
            assert!(limits.add_files(&staged, pngs(3)).is_err());
            assert_eq!(limits.add_files(&staged, pngs(2)).unwrap().len(), 10);
        }

        #[test]
        fn test_oversized_file_names_the_file() {
            let limits = AttachmentLimits::default();
            let err = limits
                .add_files(&[], vec![candidate("brief.pdf", 11 * MB, "application/pdf")])
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                "File \"brief.pdf\" is too large. Maximum size is 10MB."
            );
        }

        #[test]
        fn test_exactly_max_size_is_accepted() {
            let limits = AttachmentLimits::default();
            let staged = limits
                .add_files(&[], vec![candidate("brief.pdf", 10 * MB, "application/pdf")])
                .unwrap();
            assert_eq!(staged.len(), 1);
        }

        #[test]
        fn test_unsupported_type() {
            let limits = AttachmentLimits::default();
            let err = limits
                .add_files(&[], vec![candidate("site.zip", 10, "application/zip")])
                .unwrap_err();
            assert_eq!(err.to_string(), "File type \"application/zip\" is not supported.");
        }

        #[test]
        fn test_first_invalid_aborts_batch() {
            let limits = AttachmentLimits::default();
            let batch = vec![
                candidate("ok.png", 10, "image/png"),
                candidate("bad.exe", 10, "application/x-msdownload"),
                candidate("huge.pdf", 50 * MB, "application/pdf"),
            ];
            let err = limits.add_files(&[], batch).unwrap_err();
            assert!(matches!(err, AttachmentError::UnsupportedType { .. }));
        }

        #[test]
        fn test_success_appends_in_order_with_unique_ids() {
            let limits = AttachmentLimits::default();
            let first = limits.add_files(&[], pngs(2)).unwrap();
            let second = limits.add_files(&first, pngs(2)).unwrap();
            assert_eq!(second.len(), 4);
            assert_eq!(&second[..2], &first[..]);
            let mut ids: Vec<&str> = second.iter().map(|f| f.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), 4);
        }

        #[test]
        fn test_every_allowed_type_is_accepted() {
            let limits = AttachmentLimits::default();
            let batch: Vec<_> = ALLOWED_MIME_TYPES
                .iter()
                .enumerate()
                .map(|(i, mime)| candidate(&format!("f{i}"), 1, mime))
                .collect();
            assert_eq!(limits.add_files(&[], batch).unwrap().len(), 8);
        }
    }

    mod stager {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_rejected_batch_keeps_staged_files() {
            let mut stager = AttachmentStager::default();
            assert_eq!(stager.add_candidates(pngs(9)), 9);
            assert_eq!(stager.add_candidates(pngs(2)), 0);
            assert_eq!(stager.files().len(), 9);
            assert_eq!(
                stager.error(),
                Some(&AttachmentError::TooManyFiles { max: 10 })
            );
        }

        #[test]
        fn test_eleven_files_leave_list_empty() {
            let mut stager = AttachmentStager::default();
            stager.add_candidates(pngs(11));
            assert!(stager.files().is_empty());
            assert!(stager.error().is_some());
        }

        #[test]
        fn test_remove_clears_error() {
            let mut stager = AttachmentStager::default();
            stager.add_candidates(pngs(1));
            stager.add_candidates(vec![candidate("x.zip", 1, "application/zip")]);
            assert!(stager.error().is_some());
            let id = stager.files()[0].id.clone();
            stager.remove(&id);
            assert!(stager.files().is_empty());
            assert!(stager.error().is_none());
        }

        #[test]
        fn test_remove_unknown_id_is_noop() {
            let mut stager = AttachmentStager::default();
            stager.add_candidates(pngs(2));
            stager.remove("missing");
            assert_eq!(stager.files().len(), 2);
        }

        #[test]
        fn test_add_paths_reads_disk() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("notes.txt");
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(b"hello world").unwrap();

            let mut stager = AttachmentStager::default();
            assert_eq!(stager.add_paths(&[path.clone()]), 1);
            let staged = &stager.files()[0];
            assert_eq!(staged.name, "notes.txt");
            assert_eq!(staged.size, 11);
            assert_eq!(staged.mime_type, "text/plain");
            assert_eq!(staged.path, path);
        }

        #[test]
        fn test_add_paths_missing_file_rejects_batch() {
            let dir = tempfile::tempdir().unwrap();
            let good = dir.path().join("a.png");
            std::fs::write(&good, b"png").unwrap();
            let missing = dir.path().join("nope.png");

            let mut stager = AttachmentStager::default();
            assert_eq!(stager.add_paths(&[good, missing]), 0);
            assert!(stager.files().is_empty());
            assert!(matches!(
                stager.error(),
                Some(AttachmentError::Unreadable { .. })
            ));
        }

        #[test]
        fn test_directory_is_unreadable() {
            let dir = tempfile::tempdir().unwrap();
            let mut stager = AttachmentStager::default();
            assert_eq!(stager.add_paths(&[dir.path().to_path_buf()]), 0);
            assert!(matches!(
                stager.error(),
                Some(AttachmentError::Unreadable { .. })
            ));
        }
    }

    mod parsing {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_whitespace_separated() {
            assert_eq!(
                parse_path_list("/a/b.png  /c/d.pdf\n/e.txt").unwrap(),
                vec![
                    PathBuf::from("/a/b.png"),
                    PathBuf::from("/c/d.pdf"),
                    PathBuf::from("/e.txt")
                ]
            );
        }

        #[test]
        fn test_quotes_and_escapes() {
            assert_eq!(
                parse_path_list("'/my docs/brief.pdf' \"/x y.png\" /z\\ w.txt").unwrap(),
                vec![
                    PathBuf::from("/my docs/brief.pdf"),
                    PathBuf::from("/x y.png"),
                    PathBuf::from("/z w.txt")
                ]
            );
        }

        #[test]
        fn test_escaped_quotes_inside_double_quotes() {
            assert_eq!(
                parse_path_list(r#""/tmp/say \"hi\".png""#).unwrap(),
                vec![PathBuf::from(r#"/tmp/say "hi".png"#)]
            );
        }

        #[test]
        fn test_unclosed_quote_is_an_error() {
            assert_eq!(
                parse_path_list("'/tmp/a.png"),
                Err(AttachmentError::MalformedPathList)
            );
        }

        #[test]
        fn test_file_uri_prefix_stripped() {
            assert_eq!(
                parse_path_list("file:///home/me/logo.png").unwrap(),
                vec![PathBuf::from("/home/me/logo.png")]
            );
        }

        #[test]
        fn test_file_uri_is_percent_decoded() {
            assert_eq!(
                parse_path_list("file:///home/me/My%20File%20(1).png").unwrap(),
                vec![PathBuf::from("/home/me/My File (1).png")]
            );
        }

        #[test]
        fn test_dropped_uri_with_space_is_staged() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("My File.png");
            std::fs::write(&path, b"png").unwrap();
            let uri = format!("file://{}/My%20File.png", dir.path().display());

            let paths = parse_path_list(&uri).unwrap();
            assert_eq!(paths, vec![path]);

            let mut stager = AttachmentStager::default();
            assert_eq!(stager.add_paths(&paths), 1);
            assert_eq!(stager.files()[0].name, "My File.png");
            assert!(stager.error().is_none());
        }

        #[test]
        fn test_empty_input() {
            assert!(parse_path_list("   \n ").unwrap().is_empty());
        }
    }

    mod display {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_format_file_size() {
            assert_eq!(format_file_size(0), "0 Bytes");
            assert_eq!(format_file_size(512), "512 Bytes");
            assert_eq!(format_file_size(1_536), "1.5 KB");
            assert_eq!(format_file_size(2 * MB), "2 MB");
            assert_eq!(format_file_size(1_234_567), "1.18 MB");
        }

        #[test]
        fn test_kind() {
            let limits = AttachmentLimits::default();
            let staged = limits
                .add_files(
                    &[],
                    vec![
                        candidate("a.png", 1, "image/png"),
                        candidate("b.pdf", 1, "application/pdf"),
                        candidate("c.txt", 1, "text/plain"),
                    ],
                )
                .unwrap();
            let kinds: Vec<_> = staged.iter().map(StagedAttachment::kind).collect();
            assert_eq!(
                kinds,
                vec![AttachmentKind::Image, AttachmentKind::Pdf, AttachmentKind::Other]
            );
        }
    }
}
