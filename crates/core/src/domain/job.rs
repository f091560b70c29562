// Print Job Domain Model

use super::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Job ID (unique per creation, see `IdProvider`)
pub type JobId = String;

/// File Type (closed set, some of which printers cannot handle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Txt,
    Pdf,
    Doc,
    Xls,
    Ppt,
    Jpg,
    Png,
    Gif,
    Mp3,
    Mp4,
    Other,
}

impl FileType {
    /// Every file type, supported or not (used for uniform random choice)
    pub const ALL: [FileType; 11] = [
        FileType::Txt,
        FileType::Pdf,
        FileType::Doc,
        FileType::Xls,
        FileType::Ppt,
        FileType::Jpg,
        FileType::Png,
        FileType::Gif,
        FileType::Mp3,
        FileType::Mp4,
        FileType::Other,
    ];

    /// Types a printer accepts
    pub const SUPPORTED: [FileType; 7] = [
        FileType::Txt,
        FileType::Pdf,
        FileType::Doc,
        FileType::Xls,
        FileType::Ppt,
        FileType::Jpg,
        FileType::Png,
    ];

    /// Pure validation policy: is this type printable?
    pub fn is_supported(self) -> bool {
        Self::SUPPORTED.contains(&self)
    }

    /// Map a textual tag (as found in a job record) to a file type.
    ///
    /// Unknown tags map to `Other`, which is then rejected at job creation,
    /// never at parse time.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "txt" => FileType::Txt,
            "pdf" => FileType::Pdf,
            "doc" => FileType::Doc,
            "xls" => FileType::Xls,
            "ppt" => FileType::Ppt,
            "jpg" => FileType::Jpg,
            "png" => FileType::Png,
            "gif" => FileType::Gif,
            "mp3" => FileType::Mp3,
            "mp4" => FileType::Mp4,
            _ => FileType::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Txt => "txt",
            FileType::Pdf => "pdf",
            FileType::Doc => "doc",
            FileType::Xls => "xls",
            FileType::Ppt => "ppt",
            FileType::Jpg => "jpg",
            FileType::Png => "png",
            FileType::Gif => "gif",
            FileType::Mp3 => "mp3",
            FileType::Mp4 => "mp4",
            FileType::Other => "other",
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Print Job (immutable value, safe to hand across tasks)
///
/// Deserialization goes through `PrintJob::new`, so a decoded job is as valid
/// as a constructed one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedPrintJob")]
pub struct PrintJob {
    file_name: JobId,
    file_type: FileType,
}

impl PrintJob {
    /// Create a print job, validating its file type.
    ///
    /// # Errors
    ///
    /// * `DomainError::EmptyFileName` - name is empty or whitespace only
    /// * `DomainError::UnsupportedFileType` - type is outside the supported set
    pub fn new(file_name: impl Into<String>, file_type: FileType) -> Result<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(DomainError::EmptyFileName);
        }
        if !file_type.is_supported() {
            return Err(DomainError::UnsupportedFileType(file_type));
        }
        Ok(Self {
            file_name,
            file_type,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }
}

/// Wire shape of a print job before validation
#[derive(Deserialize)]
struct UncheckedPrintJob {
    file_name: String,
    file_type: FileType,
}

impl TryFrom<UncheckedPrintJob> for PrintJob {
    type Error = DomainError;

    fn try_from(raw: UncheckedPrintJob) -> Result<Self> {
        PrintJob::new(raw.file_name, raw.file_type)
    }
}

impl std::fmt::Display for PrintJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.file_name, self.file_type)
    }
}
