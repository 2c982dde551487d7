use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use include_dir::{Dir, include_dir};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};

use crate::adapters::filesystem::write_atomic;
use crate::domain::{AppError, TemplateError};
use crate::ports::{TemplateName, TemplateParams, TemplateRenderer};

static EMBEDDED_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Where template sources are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary.
    Embedded,
    /// `<dir>/<template file name>` on disk.
    Directory(PathBuf),
}

/// Template renderer using Minijinja.
///
/// Undefined placeholders are errors, never blank output.
#[derive(Debug, Clone)]
pub struct MinijinjaTemplateRenderer {
    source: TemplateSource,
}

impl MinijinjaTemplateRenderer {
    pub fn new(source: TemplateSource) -> Self {
        Self { source }
    }

    /// Renderer for an optional configured directory, falling back to embedded templates.
    pub fn from_config(templates_dir: Option<&Path>) -> Self {
        match templates_dir {
            Some(dir) => Self::new(TemplateSource::Directory(dir.to_path_buf())),
            None => Self::new(TemplateSource::Embedded),
        }
    }

    fn load(&self, name: TemplateName) -> Result<String, AppError> {
        let file_name = name.file_name();
        let not_found = || TemplateError::NotFound { name: file_name.to_string() };

        match &self.source {
            TemplateSource::Embedded => EMBEDDED_TEMPLATES
                .get_file(file_name)
                .and_then(|file| file.contents_utf8())
                .map(str::to_string)
                .ok_or_else(|| not_found().into()),
            TemplateSource::Directory(dir) => match fs::read_to_string(dir.join(file_name)) {
                Ok(content) => Ok(content),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Err(not_found().into()),
                Err(err) => Err(AppError::Io(err)),
            },
        }
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render_to_string<P: TemplateParams>(&self, params: &P) -> Result<String, AppError> {
        let template_name = P::TEMPLATE.file_name();
        let source = self.load(P::TEMPLATE)?;

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_template(template_name, &source)
            .map_err(|err| template_render_error(template_name, err))?;

        let template = env
            .get_template(template_name)
            .map_err(|err| template_render_error(template_name, err))?;
        template.render(params).map_err(|err| template_render_error(template_name, err))
    }

    fn render<P: TemplateParams>(
        &self,
        params: &P,
        destination: &Path,
        mode: u32,
    ) -> Result<(), AppError> {
        let rendered = self.render_to_string(params)?;
        write_atomic(destination, rendered.as_bytes(), mode).map_err(|source| {
            AppError::from(TemplateError::Write { path: destination.to_path_buf(), source })
        })?;
        tracing::debug!(
            template = P::TEMPLATE.file_name(),
            path = %destination.display(),
            mode = format_args!("{mode:o}"),
            "template rendered"
        );
        Ok(())
    }
}

fn template_render_error(template_name: &str, err: minijinja::Error) -> AppError {
    let name = template_name.to_string();
    let reason = err.to_string();
    let error = match err.kind() {
        ErrorKind::UndefinedError => TemplateError::UndefinedPlaceholder { name, reason },
        ErrorKind::TemplateNotFound => TemplateError::NotFound { name },
        _ => TemplateError::Syntax { name, reason },
    };
    error.into()
}
