//! Shell configuration wiring.
//!
//! Installed tools live under a home prefix the shell knows nothing about,
//! so an environment snippet is rendered into the rc snippet directory and
//! the user's shell rc file gets a marker-delimited block that sources
//! everything in that directory. The block is rewritten in place on every
//! run; user content around it is never touched.

use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::error::Result;
use crate::paths::Resources;

const BLOCK_BEGIN: &str = "# >>> toolup managed block >>>";
const BLOCK_END: &str = "# <<< toolup managed block <<<";

const ENV_SNIPPET_TEMPLATE: &str = r#"# Generated by toolup. Re-run `toolup init` to refresh.
export PATH="{{ prefix }}/bin:$PATH"
export LD_LIBRARY_PATH="{{ prefix }}/lib:${LD_LIBRARY_PATH:-}"
export MANPATH="{{ prefix }}/share/man:${MANPATH:-}"
"#;

/// Render the environment snippet pointing the shell at the install prefix.
pub fn render_env_snippet(prefix: &Path) -> Result<String> {
    let mut context = Context::new();
    context.insert("prefix", &prefix.display().to_string());
    Ok(Tera::one_off(ENV_SNIPPET_TEMPLATE, &context, false)?)
}

/// Write the environment snippet into the rc snippet directory.
pub fn write_env_snippet(res: &Resources) -> Result<PathBuf> {
    let content = render_env_snippet(&res.prefix)?;
    std::fs::create_dir_all(&res.rc_snippets)?;
    let path = res.rc_snippets.join("00-local.sh");
    std::fs::write(&path, content)?;
    Ok(path)
}

fn managed_block(snippets_dir: &Path) -> String {
    format!(
        "{begin}\nfor snippet in \"{dir}\"/*.sh; do\n    [ -r \"$snippet\" ] && . \"$snippet\"\ndone\n{end}",
        begin = BLOCK_BEGIN,
        dir = snippets_dir.display(),
        end = BLOCK_END,
    )
}

/// Replace the managed block in `existing`, or append one if absent.
/// Returns the new content and whether anything changed.
fn splice_block(existing: &str, block: &str) -> (String, bool) {
    let lines: Vec<&str> = existing.lines().collect();
    let begin = lines.iter().position(|l| l.trim() == BLOCK_BEGIN);
    let end = lines.iter().position(|l| l.trim() == BLOCK_END);

    let updated = match (begin, end) {
        (Some(b), Some(e)) if b <= e => {
            let mut out: Vec<String> = lines[..b].iter().map(|l| l.to_string()).collect();
            out.push(block.to_string());
            out.extend(lines[e + 1..].iter().map(|l| l.to_string()));
            let mut joined = out.join("\n");
            joined.push('\n');
            joined
        }
        _ => {
            let mut joined = existing.trim_end().to_string();
            if !joined.is_empty() {
                joined.push_str("\n\n");
            }
            joined.push_str(block);
            joined.push('\n');
            joined
        }
    };

    let changed = updated != existing;
    (updated, changed)
}

/// Ensure the shell rc file sources the rc snippet directory.
/// Returns true when the rc file was modified.
pub fn wire_shell_rc(res: &Resources) -> Result<bool> {
    let existing = if res.shell_rc.exists() {
        std::fs::read_to_string(&res.shell_rc)?
    } else {
        String::new()
    };

    let block = managed_block(&res.rc_snippets);
    let (updated, changed) = splice_block(&existing, &block);

    if changed {
        if let Some(parent) = res.shell_rc.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&res.shell_rc, updated)?;
        tracing::info!("rewrote managed block in {}", res.shell_rc.display());
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn resources_in(dir: &Path) -> Resources {
        let config = AppConfig {
            prefix: dir.join("local").display().to_string(),
            repositories_dir: dir.join("Repositories").display().to_string(),
            packages_dir: dir.join("Packages").display().to_string(),
            configs_dir: dir.join("configs").display().to_string(),
            temp_dir: dir.join("tmp").display().to_string(),
            shell_rc: dir.join(".bashrc").display().to_string(),
            jobs: 1,
        };
        let mut res = Resources::from_config(&config).unwrap();
        res.config_dir = dir.join(".config");
        res.rc_snippets = res.config_dir.join("bashrc");
        res
    }

    #[test]
    fn test_render_env_snippet() {
        let rendered = render_env_snippet(Path::new("/home/dev/.local")).unwrap();
        assert!(rendered.contains("export PATH=\"/home/dev/.local/bin:$PATH\""));
        assert!(rendered.contains("/home/dev/.local/lib"));
        assert!(rendered.contains("/home/dev/.local/share/man"));
    }

    #[test]
    fn test_write_env_snippet() {
        let temp = tempfile::tempdir().unwrap();
        let res = resources_in(temp.path());

        let path = write_env_snippet(&res).unwrap();
        assert!(path.ends_with("bashrc/00-local.sh"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("local/bin"));
    }

    #[test]
    fn test_wire_shell_rc_appends_block() {
        let temp = tempfile::tempdir().unwrap();
        let res = resources_in(temp.path());
        std::fs::write(&res.shell_rc, "alias ll='ls -l'\n").unwrap();

        assert!(wire_shell_rc(&res).unwrap());

        let content = std::fs::read_to_string(&res.shell_rc).unwrap();
        assert!(content.starts_with("alias ll='ls -l'"));
        assert!(content.contains(BLOCK_BEGIN));
        assert!(content.contains(BLOCK_END));
    }

    #[test]
    fn test_wire_shell_rc_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let res = resources_in(temp.path());

        assert!(wire_shell_rc(&res).unwrap());
        let first = std::fs::read_to_string(&res.shell_rc).unwrap();

        assert!(!wire_shell_rc(&res).unwrap());
        let second = std::fs::read_to_string(&res.shell_rc).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches(BLOCK_BEGIN).count(), 1);
    }

    #[test]
    fn test_wire_shell_rc_replaces_stale_block() {
        let temp = tempfile::tempdir().unwrap();
        let res = resources_in(temp.path());

        let stale = format!(
            "# mine\n{}\n. /old/path/snippets.sh\n{}\n# after\n",
            BLOCK_BEGIN, BLOCK_END
        );
        std::fs::write(&res.shell_rc, stale).unwrap();

        assert!(wire_shell_rc(&res).unwrap());

        let content = std::fs::read_to_string(&res.shell_rc).unwrap();
        assert!(!content.contains("/old/path/snippets.sh"));
        assert!(content.contains("# mine"));
        assert!(content.contains("# after"));
        assert_eq!(content.matches(BLOCK_BEGIN).count(), 1);
    }

    #[test]
    fn test_wire_shell_rc_creates_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let res = resources_in(temp.path());

        assert!(wire_shell_rc(&res).unwrap());
        assert!(res.shell_rc.exists());
    }
}
