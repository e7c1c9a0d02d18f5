use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::{Response, StatusCode, Uri};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use crate::config::{DotfilesPolicy, OptionsValidator, StaticOptions, ValidationError};
use crate::core::path::{final_segment, normalize, strip_prefix_once};
use crate::ports::file_probe::{FileProbe, ProbeError, Probed};

/// Error type for resolution failures
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveError {
    /// Unclassified IO failure reported by the file probe
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Failed to assemble an HTTP response
    #[error("Response build error: {0}")]
    Http(#[from] http::Error),
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Decision engine turning request paths into static file responses.
///
/// The resolver owns no mutable state: options are frozen at construction
/// and every request performs at most two sequential probes (the target,
/// then optionally a directory index). Instances are shared behind an `Arc`
/// across concurrent requests.
pub struct StaticResolver {
    root: PathBuf,
    options: StaticOptions,
    extra_headers: HeaderMap,
    probe: Arc<dyn FileProbe>,
}

impl StaticResolver {
    /// Create a resolver serving `root` with the given options.
    ///
    /// The root must be an absolute path to an existing directory; ambient
    /// process state is never consulted.
    pub fn new(
        root: impl Into<PathBuf>,
        options: StaticOptions,
        probe: Arc<dyn FileProbe>,
    ) -> Result<Self, ValidationError> {
        let root = root.into();
        OptionsValidator::validate(&root, &options)?;

        let mut extra_headers = HeaderMap::new();
        for (name, value) in &options.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    extra_headers.append(name, value);
                }
                _ => {
                    tracing::warn!("Skipping unparseable extra header: {}", name);
                }
            }
        }

        Ok(Self {
            root,
            options,
            extra_headers,
            probe,
        })
    }

    /// Resolve a request URL into a complete HTTP response.
    ///
    /// The outcome is one of: 308 redirect to a normalized path, 200 with the
    /// file's bytes, 404 when nothing exists at the path, or 403 when the
    /// target is not servable. A redirect always wins over serving content.
    pub async fn resolve(&self, uri: &Uri) -> ResolveResult<Response<Bytes>> {
        let request_path = match &self.options.strip_prefix {
            Some(prefix) => strip_prefix_once(uri.path(), prefix),
            None => uri.path().to_string(),
        };

        let fs_path = self.fs_path(&request_path);
        let probed = self.probe.probe(&fs_path).await?;

        if probed == Probed::Missing {
            tracing::debug!("No filesystem entry for request path: {}", request_path);
            return self.not_found();
        }

        let is_dir = probed == Probed::Directory;
        if let Some(target) = self.redirect_target(&request_path, is_dir) {
            let location = match uri.query() {
                Some(query) => format!("{target}?{query}"),
                None => target,
            };
            tracing::debug!("Redirecting {} to {}", request_path, location);
            return self.redirect(&location);
        }

        if let Probed::File(info) = probed {
            if self.dotfile_denied(&request_path) {
                tracing::debug!("Denying dotfile target: {}", request_path);
                return self.forbidden();
            }
            return self.serve(&fs_path, info.mime.as_deref()).await;
        }

        self.serve_index(&request_path, &fs_path).await
    }

    /// Map a request path onto the filesystem below the configured root.
    ///
    /// The path is percent-decoded and reduced to its normal components, so
    /// `..` and absolute segments cannot address anything outside the root.
    fn fs_path(&self, request_path: &str) -> PathBuf {
        let decoded = percent_decode_str(request_path)
            .decode_utf8()
            .unwrap_or(Cow::Borrowed(request_path));

        let relative: PathBuf = Path::new(&*decoded)
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();

        self.root.join(relative)
    }

    /// Compute the normalized form of `request_path`, returning it only when
    /// it differs from the original.
    fn redirect_target(&self, request_path: &str, is_dir: bool) -> Option<String> {
        let had_trailing = request_path.ends_with('/');

        let mut target = if self.options.collapse_slashes {
            // A file target never keeps a trailing slash.
            let keep_trailing = is_dir && (had_trailing || self.options.dir_trailing_slash);
            normalize(request_path, true, keep_trailing)
        } else {
            request_path.to_string()
        };

        if self.options.dir_trailing_slash && is_dir && !target.ends_with('/') {
            target.push('/');
        }

        (target != request_path).then_some(target)
    }

    /// Whether the dotfile policy blocks this request path's final segment.
    ///
    /// Only the leaf is inspected; intermediate dotfile directories pass.
    fn dotfile_denied(&self, request_path: &str) -> bool {
        self.options.dotfiles == DotfilesPolicy::Deny
            && final_segment(request_path).is_some_and(|leaf| leaf.starts_with('.'))
    }

    async fn serve(&self, fs_path: &Path, mime: Option<&str>) -> ResolveResult<Response<Bytes>> {
        let content = self.probe.read(fs_path).await?;
        let mime = mime.unwrap_or(self.options.default_mime.as_str());
        let content_type = format!("{mime}; charset={}", self.options.charset);

        tracing::debug!(
            "Serving {} ({} bytes) as {}",
            fs_path.display(),
            content.len(),
            content_type
        );

        self.respond(StatusCode::OK, &content_type, content, None)
    }

    async fn serve_index(
        &self,
        request_path: &str,
        fs_path: &Path,
    ) -> ResolveResult<Response<Bytes>> {
        let Some(index) = &self.options.index else {
            return self.forbidden();
        };

        if self.options.dotfiles == DotfilesPolicy::Deny && index.starts_with('.') {
            return self.forbidden();
        }

        let index_path = fs_path.join(index);
        match self.probe.probe(&index_path).await? {
            Probed::File(info) => self.serve(&index_path, info.mime.as_deref()).await,
            _ => {
                tracing::debug!("Directory has no servable index: {}", request_path);
                self.forbidden()
            }
        }
    }

    fn not_found(&self) -> ResolveResult<Response<Bytes>> {
        self.respond(
            StatusCode::NOT_FOUND,
            &self.text_content_type(),
            Bytes::from_static(b"Not Found"),
            None,
        )
    }

    fn forbidden(&self) -> ResolveResult<Response<Bytes>> {
        self.respond(
            StatusCode::FORBIDDEN,
            &self.text_content_type(),
            Bytes::from_static(b"Forbidden"),
            None,
        )
    }

    fn redirect(&self, location: &str) -> ResolveResult<Response<Bytes>> {
        self.respond(
            StatusCode::PERMANENT_REDIRECT,
            &self.text_content_type(),
            Bytes::new(),
            Some(location),
        )
    }

    fn text_content_type(&self) -> String {
        format!("text/plain; charset={}", self.options.charset)
    }

    /// Assemble a response: resolver-owned headers first, then the configured
    /// extra headers. Validation guarantees the extras never name
    /// `Content-Type` or `Location`.
    fn respond(
        &self,
        status: StatusCode,
        content_type: &str,
        body: Bytes,
        location: Option<&str>,
    ) -> ResolveResult<Response<Bytes>> {
        let mut builder = Response::builder()
            .status(status)
            .header(header::CONTENT_TYPE, content_type);
        if let Some(location) = location {
            builder = builder.header(header::LOCATION, location);
        }

        let mut response = builder.body(body)?;
        for (name, value) in &self.extra_headers {
            response.headers_mut().append(name.clone(), value.clone());
        }

        Ok(response)
    }
}
