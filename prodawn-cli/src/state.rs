use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn user_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home))
}

/// `$PRODAWN_HOME`, or `~/.prodawn` when unset.
pub fn prodawn_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("PRODAWN_HOME") {
        return Ok(PathBuf::from(dir));
    }
    Ok(user_home()?.join(".prodawn"))
}

pub fn ensure_prodawn_home() -> Result<PathBuf> {
    let dir = prodawn_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Resolve a leading `~` against `$HOME`. `~user` forms are left alone.
pub fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => Ok(user_home()?.join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}

pub fn default_model_path() -> Result<PathBuf> {
    Ok(prodawn_home()?.join("model.json"))
}

pub fn default_columns_path() -> Result<PathBuf> {
    Ok(prodawn_home()?.join("columns.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_without_tilde_are_untouched() {
        assert_eq!(expand_home(Path::new("/tmp/m.json")).unwrap(), PathBuf::from("/tmp/m.json"));
        assert_eq!(expand_home(Path::new("rel/m.json")).unwrap(), PathBuf::from("rel/m.json"));
        assert_eq!(expand_home(Path::new("~other/m.json")).unwrap(), PathBuf::from("~other/m.json"));
    }

    #[test]
    fn leading_tilde_resolves_under_home() {
        let Ok(home) = std::env::var("HOME") else {
            return;
        };
        assert_eq!(
            expand_home(Path::new("~/.prodawn/model.json")).unwrap(),
            PathBuf::from(home).join(".prodawn/model.json")
        );
    }
}
