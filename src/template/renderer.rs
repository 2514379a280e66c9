//! Placeholder substitution and output of the rendered document

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::descriptor::TargetDescriptor;
use crate::error::TemplateError;

/// Template file name looked up in the template directory
pub const TEMPLATE_FILE: &str = "nvmet-subsys.json.tmpl";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Loads the subsystem template from a directory and renders it
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    base_path: PathBuf,
}

impl TemplateRenderer {
    /// Create a renderer reading templates from `base_path`
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Create a renderer reading templates from the executable's directory
    pub fn from_install_dir() -> Result<Self, TemplateError> {
        let exe = std::env::current_exe().map_err(|source| TemplateError::FileRead {
            path: PathBuf::from(TEMPLATE_FILE),
            source,
        })?;
        Ok(Self::new(install_dir(&exe)?))
    }

    /// Full path of the subsystem template
    pub fn template_path(&self) -> PathBuf {
        self.base_path.join(TEMPLATE_FILE)
    }

    /// Read the raw template text
    pub fn load(&self) -> Result<String, TemplateError> {
        let path = self.template_path();
        std::fs::read_to_string(&path).map_err(|source| TemplateError::FileRead { path, source })
    }

    /// Render the template for a descriptor
    pub fn render(&self, descriptor: &TargetDescriptor) -> Result<String, TemplateError> {
        render_str(&self.load()?, &descriptor.parameters())
    }

    /// Render and write `<subsysnqn>.json` into `dir`, replacing any existing file
    pub fn render_to(
        &self,
        descriptor: &TargetDescriptor,
        dir: &Path,
    ) -> Result<PathBuf, TemplateError> {
        let content = self.render(descriptor)?;
        let path = dir.join(descriptor.file_name());
        std::fs::write(&path, content).map_err(|source| TemplateError::FileWrite {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote target configuration");
        Ok(path)
    }
}

/// Directory containing the executable at `exe`
fn install_dir(exe: &Path) -> Result<PathBuf, TemplateError> {
    exe.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| TemplateError::NoInstallDir {
            exe: exe.to_path_buf(),
        })
}

/// Substitute `{{ name }}` placeholders in a JSON template
///
/// Values are escaped as JSON string contents. Whitespace inside the braces
/// is ignored. The result must parse as JSON.
///
/// ```rust
/// use std::collections::HashMap;
/// use nvme_target_control::template::render_str;
///
/// let params = HashMap::from([("subsysnqn", "blktests-subsystem-1")]);
/// let out = render_str(r#"{"nqn": "{{ subsysnqn }}"}"#, &params).unwrap();
/// assert_eq!(out, r#"{"nqn": "blktests-subsystem-1"}"#);
/// ```
pub fn render_str(template: &str, params: &HashMap<&str, &str>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);

        let inner = &rest[start + OPEN.len()..];
        let end = inner.find(CLOSE).ok_or(TemplateError::Unterminated {
            offset: offset + start,
        })?;
        let name = inner[..end].trim();
        let value = params
            .get(name)
            .ok_or_else(|| TemplateError::UnknownParameter {
                name: name.to_string(),
                offset: offset + start,
            })?;
        out.push_str(&escape_json(value)?);

        let consumed = start + OPEN.len() + end + CLOSE.len();
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);

    serde_json::from_str::<serde_json::Value>(&out)?;
    Ok(out)
}

/// Escape a value for use inside a JSON string literal
fn escape_json(value: &str) -> Result<String, TemplateError> {
    let quoted = serde_json::to_string(value)?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params() -> HashMap<&'static str, &'static str> {
        HashMap::from([("subsysnqn", "sub1"), ("hostnqn", "h1"), ("hostkey", "")])
    }

    #[test]
    fn test_substitutes_placeholders() {
        let out = render_str(r#"{"a": "{{subsysnqn}}", "b": "{{  hostnqn }}"}"#, &params()).unwrap();
        assert_eq!(out, r#"{"a": "sub1", "b": "h1"}"#);
    }

    #[test]
    fn test_empty_value() {
        let out = render_str(r#"{"key": "{{ hostkey }}"}"#, &params()).unwrap();
        assert_eq!(out, r#"{"key": ""}"#);
    }

    #[test]
    fn test_values_are_json_escaped() {
        let params = HashMap::from([("blkdev", r#"/dev/we"ird\path"#)]);
        let out = render_str(r#"{"path": "{{ blkdev }}"}"#, &params).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["path"], r#"/dev/we"ird\path"#);
    }

    #[test]
    fn test_unknown_parameter() {
        let err = render_str(r#"{"a": "{{ nope }}"}"#, &params()).unwrap_err();
        match err {
            TemplateError::UnknownParameter { name, offset } => {
                assert_eq!(name, "nope");
                assert_eq!(offset, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_placeholder() {
        let err = render_str(r#"{"a": "{{ subsysnqn"#, &params()).unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated { offset: 7 }));
    }

    #[test]
    fn test_rejects_invalid_json() {
        let err = render_str("{{ subsysnqn }}", &params()).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidJson(_)));
    }

    #[test]
    fn test_install_dir_is_executable_parent() {
        let dir = install_dir(Path::new("/usr/libexec/nvme-target-control")).unwrap();
        assert_eq!(dir, PathBuf::from("/usr/libexec"));
    }

    #[test]
    fn test_install_dir_without_parent() {
        for exe in ["/", "nvme-target-control"] {
            assert!(matches!(
                install_dir(Path::new(exe)),
                Err(TemplateError::NoInstallDir { .. })
            ));
        }
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::new(dir.path());
        let desc = TargetDescriptor::new("sub1", "u1", "h1", "/dev/nullb0");
        assert!(matches!(
            renderer.render(&desc),
            Err(TemplateError::FileRead { .. })
        ));
    }

    #[test]
    fn test_render_to_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TEMPLATE_FILE),
            r#"{"nqn": "{{ subsysnqn }}", "uuid": "{{ subsys_uuid }}"}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("sub1.json"), "stale").unwrap();

        let renderer = TemplateRenderer::new(dir.path());
        let desc = TargetDescriptor::new("sub1", "u1", "h1", "/dev/nullb0");
        let path = renderer.render_to(&desc, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("sub1.json"));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"nqn": "sub1", "uuid": "u1"}"#
        );
    }

    #[test]
    fn test_render_to_unwritable_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEMPLATE_FILE), r#"{"nqn": "{{ subsysnqn }}"}"#).unwrap();

        let renderer = TemplateRenderer::new(dir.path());
        let desc = TargetDescriptor::new("sub1", "u1", "h1", "/dev/nullb0");
        let missing = dir.path().join("does-not-exist");
        assert!(matches!(
            renderer.render_to(&desc, &missing),
            Err(TemplateError::FileWrite { .. })
        ));
    }
}
