//! Parent directory keywords and their resolution to real paths.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use directories::{BaseDirs, UserDirs};

use crate::error::LocatorError;

/// Well-known directory a catalog entry is relative to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentDir {
    /// `Public/Documents`.
    PublicDocument,
    /// The user's documents folder.
    Document,
    /// `AppData/Local`.
    Local,
    /// `AppData/Roaming`.
    Roaming,
    /// `C:\ProgramData`.
    ProgramData,
    /// `C:\Program Files (x86)`.
    ProgramFilesX86,
    /// Install location unknown; every disk has to be searched.
    GameDir,
}

impl ParentDir {
    /// The keyword used for this variant in catalog files.
    pub fn keyword(&self) -> &'static str {
        match self {
            ParentDir::PublicDocument => "Public_Document",
            ParentDir::Document => "Document",
            ParentDir::Local => "Local",
            ParentDir::Roaming => "Roaming",
            ParentDir::ProgramData => "ProgramData",
            ParentDir::ProgramFilesX86 => "Program Files (x86)",
            ParentDir::GameDir => "GAMEDIR",
        }
    }
}

impl FromStr for ParentDir {
    type Err = LocatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Public_Document" => Ok(ParentDir::PublicDocument),
            "Document" => Ok(ParentDir::Document),
            "Local" => Ok(ParentDir::Local),
            "Roaming" => Ok(ParentDir::Roaming),
            "ProgramData" => Ok(ParentDir::ProgramData),
            "Program Files (x86)" => Ok(ParentDir::ProgramFilesX86),
            "GAMEDIR" => Ok(ParentDir::GameDir),
            other => Err(LocatorError::InvalidParent(other.to_string())),
        }
    }
}

impl fmt::Display for ParentDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Where to look for a catalog entry's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBase {
    /// A single known directory.
    Directory(PathBuf),
    /// Every directory on every scanned disk root.
    AllDisks,
}

/// Resolved locations of the well-known parent directories.
///
/// Fields are `None` when the platform has no such directory.
#[derive(Debug, Clone, Default)]
pub struct Directories {
    pub public: Option<PathBuf>,
    pub document: Option<PathBuf>,
    pub data_local: Option<PathBuf>,
    pub data_roaming: Option<PathBuf>,
    pub program_data: Option<PathBuf>,
    pub program_files_x86: Option<PathBuf>,
}

impl Directories {
    /// Detects the current user's directories.
    pub fn detect() -> Self {
        let user = UserDirs::new();
        let base = BaseDirs::new();

        Self {
            public: user
                .as_ref()
                .and_then(|u| u.public_dir())
                .map(|p| p.to_path_buf()),
            document: user
                .as_ref()
                .and_then(|u| u.document_dir())
                .map(|p| p.to_path_buf()),
            data_local: base.as_ref().map(|b| b.data_local_dir().to_path_buf()),
            data_roaming: base.as_ref().map(|b| b.data_dir().to_path_buf()),
            program_data: windows_dir("C:\\ProgramData"),
            program_files_x86: windows_dir("C:\\Program Files (x86)"),
        }
    }

    /// Resolves a parent keyword to where its files should be searched.
    pub fn resolve(&self, parent: ParentDir) -> Result<SearchBase, LocatorError> {
        let dir = match parent {
            ParentDir::GameDir => return Ok(SearchBase::AllDisks),
            ParentDir::PublicDocument => self.public.as_ref().map(|p| p.join("Documents")),
            ParentDir::Document => self.document.clone(),
            ParentDir::Local => self.data_local.clone(),
            ParentDir::Roaming => self.data_roaming.clone(),
            ParentDir::ProgramData => self.program_data.clone(),
            ParentDir::ProgramFilesX86 => self.program_files_x86.clone(),
        };

        dir.map(SearchBase::Directory)
            .ok_or_else(|| LocatorError::DirectoryUnavailable(parent.keyword().to_string()))
    }
}

#[cfg(windows)]
fn windows_dir(path: &str) -> Option<PathBuf> {
    Some(PathBuf::from(path))
}

#[cfg(not(windows))]
fn windows_dir(_path: &str) -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ParentDir; 7] = [
        ParentDir::PublicDocument,
        ParentDir::Document,
        ParentDir::Local,
        ParentDir::Roaming,
        ParentDir::ProgramData,
        ParentDir::ProgramFilesX86,
        ParentDir::GameDir,
    ];

    #[test]
    fn keywords_parse_back() {
        for parent in ALL {
            assert_eq!(parent.keyword().parse::<ParentDir>().unwrap(), parent);
            assert_eq!(parent.to_string(), parent.keyword());
        }
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        let err = "Desktop".parse::<ParentDir>().unwrap_err();
        assert!(matches!(err, LocatorError::InvalidParent(ref k) if k == "Desktop"));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!("document".parse::<ParentDir>().is_err());
        assert!("gamedir".parse::<ParentDir>().is_err());
    }

    #[test]
    fn public_document_appends_documents() {
        let dirs = Directories {
            public: Some(PathBuf::from("/users/public")),
            ..Default::default()
        };

        assert_eq!(
            dirs.resolve(ParentDir::PublicDocument).unwrap(),
            SearchBase::Directory(PathBuf::from("/users/public").join("Documents"))
        );
    }

    #[test]
    fn resolve_known_directories() {
        let dirs = Directories {
            document: Some(PathBuf::from("/home/me/Documents")),
            data_local: Some(PathBuf::from("/home/me/.local/share")),
            data_roaming: Some(PathBuf::from("/home/me/.config")),
            ..Default::default()
        };

        assert_eq!(
            dirs.resolve(ParentDir::Document).unwrap(),
            SearchBase::Directory(PathBuf::from("/home/me/Documents"))
        );
        assert_eq!(
            dirs.resolve(ParentDir::Local).unwrap(),
            SearchBase::Directory(PathBuf::from("/home/me/.local/share"))
        );
        assert_eq!(
            dirs.resolve(ParentDir::Roaming).unwrap(),
            SearchBase::Directory(PathBuf::from("/home/me/.config"))
        );
    }

    #[test]
    fn game_dir_searches_all_disks() {
        let dirs = Directories::default();
        assert_eq!(
            dirs.resolve(ParentDir::GameDir).unwrap(),
            SearchBase::AllDisks
        );
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dirs = Directories::default();
        let err = dirs.resolve(ParentDir::ProgramData).unwrap_err();
        assert!(matches!(err, LocatorError::DirectoryUnavailable(ref k) if k == "ProgramData"));
    }
}
