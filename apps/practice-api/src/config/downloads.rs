//! Desktop installer download configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Desktop platform with a published installer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Windows setup executable.
    Windows,
    /// macOS disk image.
    Mac,
    /// Linux AppImage.
    Linux,
}

impl Platform {
    /// Every supported platform.
    pub const ALL: [Self; 3] = [Self::Windows, Self::Mac, Self::Linux];

    /// Path segment name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Linux => "linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(Self::Windows),
            "mac" => Ok(Self::Mac),
            "linux" => Ok(Self::Linux),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// Installer download configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadsConfig {
    /// Directory the desktop build writes installers to.
    #[serde(default = "default_release_dir")]
    pub release_dir: PathBuf,
    /// Windows installer file name.
    #[serde(default = "default_windows")]
    pub windows: String,
    /// macOS installer file name.
    #[serde(default = "default_mac")]
    pub mac: String,
    /// Linux installer file name.
    #[serde(default = "default_linux")]
    pub linux: String,
    /// Command shown when an installer has not been built.
    #[serde(default = "default_build_command")]
    pub build_command: String,
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            release_dir: default_release_dir(),
            windows: default_windows(),
            mac: default_mac(),
            linux: default_linux(),
            build_command: default_build_command(),
        }
    }
}

impl DownloadsConfig {
    /// Installer file name for `platform`.
    pub fn installer_name(&self, platform: Platform) -> &str {
        match platform {
            Platform::Windows => &self.windows,
            Platform::Mac => &self.mac,
            Platform::Linux => &self.linux,
        }
    }

    /// Full installer path for `platform`.
    pub fn installer_path(&self, platform: Platform) -> PathBuf {
        self.release_dir.join(self.installer_name(platform))
    }
}

fn default_release_dir() -> PathBuf {
    PathBuf::from("release")
}

fn default_windows() -> String {
    "TheraVault-Setup.exe".to_string()
}

fn default_mac() -> String {
    "TheraVault.dmg".to_string()
}

fn default_linux() -> String {
    "TheraVault.AppImage".to_string()
}

fn default_build_command() -> String {
    "npm run electron:build".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_known_names_only() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
        assert!("solaris".parse::<Platform>().is_err());
        assert!("Windows".parse::<Platform>().is_err());
    }

    #[test]
    fn default_installer_paths() {
        let config = DownloadsConfig::default();
        assert_eq!(
            config.installer_path(Platform::Windows),
            PathBuf::from("release/TheraVault-Setup.exe")
        );
        assert_eq!(config.installer_name(Platform::Mac), "TheraVault.dmg");
        assert_eq!(config.installer_name(Platform::Linux), "TheraVault.AppImage");
    }
}
