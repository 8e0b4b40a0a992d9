//! Release packages expected from the Input Leap CI workflow
//!
//! Each workflow artifact is a zip holding one installable package (plus
//! whatever else the job uploaded). The table says which entry to pull out of
//! each artifact and what to call it in the release directory.

use crate::archive::EntryPattern;
use crate::error::ArtifactError;

/// Placeholder replaced by the release version in destination templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// One artifact the release needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpectedArtifact {
    /// Artifact name as uploaded by the workflow
    pub name: &'static str,
    /// Regex matched from the start of each archive entry name
    pub pattern: &'static str,
    /// Destination filename template containing `{version}`
    pub destination: &'static str,
}

impl ExpectedArtifact {
    /// Destination filename for `version`
    pub fn destination_for(&self, version: &str) -> String {
        self.destination.replace(VERSION_PLACEHOLDER, version)
    }

    /// Compiled entry pattern
    pub fn entry_pattern(&self) -> Result<EntryPattern, ArtifactError> {
        EntryPattern::new(self.pattern).map_err(|e| ArtifactError::InvalidPattern {
            name: self.name.to_string(),
            pattern: self.pattern.to_string(),
            reason: e.to_string(),
        })
    }
}

const fn expected(
    name: &'static str,
    pattern: &'static str,
    destination: &'static str,
) -> ExpectedArtifact {
    ExpectedArtifact {
        name,
        pattern,
        destination,
    }
}

/// Every artifact a release is assembled from, in processing order
pub const EXPECTED_ARTIFACTS: &[ExpectedArtifact] = &[
    expected(
        "input-leap-deb-debian-12",
        "input-leap_.*_amd64.deb",
        "InputLeap_{version}_debian12_amd64.deb",
    ),
    expected(
        "input-leap-deb-ubuntu-20-04",
        "input-leap_.*_amd64.deb",
        "InputLeap_{version}_ubuntu_20-04_amd64.deb",
    ),
    expected(
        "input-leap-deb-ubuntu-22-04",
        "input-leap_.*_amd64.deb",
        "InputLeap_{version}_ubuntu_22-04_amd64.deb",
    ),
    expected(
        "input-leap-deb-ubuntu-24-04",
        "input-leap_.*_amd64.deb",
        "InputLeap_{version}_ubuntu_24-04_amd64.deb",
    ),
    expected(
        "input-leap-deb-ubuntu-24-10",
        "input-leap_.*_amd64.deb",
        "InputLeap_{version}_ubuntu_24-10_amd64.deb",
    ),
    expected(
        "input-leap-rpms-fedora",
        "x86_64/input-leap-.*.fc40.x86_64.rpm",
        "InputLeap_{version}_fedora_fc40_x86_64.rpm",
    ),
    expected(
        "input-leap-flatpak-x86_64",
        "input-leap.flatpak",
        "InputLeap_{version}_linux_x86_64.flatpak",
    ),
    expected(
        "macOS-Apple_Silicon-installer",
        "InputLeap-.*-release.dmg",
        "InputLeap_{version}_macos_AppleSilicon.dmg",
    ),
    expected(
        "macOS-x86_64-installer",
        "InputLeap-.*-release.dmg",
        "InputLeap_{version}_macos_x86_64.dmg",
    ),
    expected(
        "windows-installer-Windows Qt5",
        "InputLeapSetup-.*-release.exe",
        "InputLeap_{version}_windows_qt5.exe",
    ),
    expected(
        "windows-installer-Windows Qt6",
        "InputLeapSetup-.*-release.exe",
        "InputLeap_{version}_windows_qt6.exe",
    ),
];
