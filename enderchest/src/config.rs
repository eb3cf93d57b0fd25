use std::path::{Path, PathBuf};

/// Environment variable overriding where worlds are looked for.
pub const WORLDS_DIR_ENV: &str = "ENDERCHEST_WORLDS_DIR";

/// Package family of the Windows store release of the game.
const UWP_PACKAGE: &str = "Microsoft.MinecraftUWP_8wekyb3d8bbwe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one folder per world.
    pub worlds_dir: PathBuf,
}

impl Config {
    /// Use `worlds_dir` if given, otherwise the game's default location on
    /// this platform. `None` if no default can be worked out.
    pub fn resolve(worlds_dir: Option<PathBuf>) -> Option<Self> {
        let worlds_dir = worlds_dir.or_else(default_worlds_dir)?;
        Some(Self { worlds_dir })
    }
}

/// Where the game keeps its worlds on this platform.
pub fn default_worlds_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        let local = std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .or_else(|| home_dir().map(|home| home.join("AppData").join("Local")))?;
        Some(windows_worlds_dir(&local))
    } else {
        home_dir().map(|home| linux_worlds_dir(&home))
    }
}

fn windows_worlds_dir(local_app_data: &Path) -> PathBuf {
    local_app_data
        .join("Packages")
        .join(UWP_PACKAGE)
        .join("LocalState")
        .join("games")
        .join("com.mojang")
        .join("minecraftWorlds")
}

// Location used by mcpelauncher, the usual way of running the game on Linux.
fn linux_worlds_dir(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("mcpelauncher")
        .join("games")
        .join("com.mojang")
        .join("minecraftWorlds")
}

fn home_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    std::env::var_os(var)
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = Config::resolve(Some(PathBuf::from("/worlds"))).unwrap();
        assert_eq!(config.worlds_dir, PathBuf::from("/worlds"));
    }

    #[test]
    fn windows_layout() {
        let dir = windows_worlds_dir(Path::new("C:/Users/steve/AppData/Local"));
        assert!(dir.starts_with("C:/Users/steve/AppData/Local/Packages"));
        assert!(dir.ends_with("LocalState/games/com.mojang/minecraftWorlds"));
        assert!(dir
            .components()
            .any(|c| c.as_os_str() == "Microsoft.MinecraftUWP_8wekyb3d8bbwe"));
    }

    #[test]
    fn linux_layout() {
        assert_eq!(
            linux_worlds_dir(Path::new("/home/steve")),
            PathBuf::from("/home/steve/.local/share/mcpelauncher/games/com.mojang/minecraftWorlds")
        );
    }
}
