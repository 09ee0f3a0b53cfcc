//! Walking over the advisories of a feed

use crate::error::Error;
use crate::model::rolie::AdvisoryFile;
use crate::model::tlp::TlpLabel;
use crate::source::Source;
use futures::{StreamExt, stream};
use once_cell::sync::Lazy;
use regex::Regex;
use std::pin::pin;
use url::Url;
use walker_common::{report::IssueSink, utils::url::resolve};

static CSAF_FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    // checked by the tests
    Regex::new(r"^[+\-a-z0-9]+(_[+\-a-z0-9]+)*\.json$")
        .expect("regular expression must be valid")
});

/// The mask for advisories listed in ROLIE feeds: the file name must follow the CSAF
/// file name conventions.
pub fn rolie_mask(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .is_some_and(is_csaf_file_name)
}

fn is_csaf_file_name(name: &str) -> bool {
    CSAF_FILE_NAME.is_match(name)
}

/// Loads all advisories of a feed, reporting problems along the way.
///
/// For every advisory which could be loaded, the label callback is invoked with the actual label
/// of the document.
pub struct IntegrityWalker<'a, S: Source> {
    source: &'a S,
    report: &'a dyn IssueSink,
    concurrency: usize,
}

impl<'a, S: Source> IntegrityWalker<'a, S> {
    pub fn new(source: &'a S, report: &'a dyn IssueSink) -> Self {
        Self {
            source,
            report,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Walk the advisory files, resolving them against `base`.
    ///
    /// Only fatal source errors abort the walk.
    pub async fn walk<F>(
        &self,
        files: &[AdvisoryFile],
        base: &Url,
        mut on_label: F,
    ) -> Result<(), Error>
    where
        F: FnMut(TlpLabel, &Url),
    {
        let loaded = stream::iter(files)
            .map(|file| async move {
                let loaded = match resolve(base, &file.url) {
                    Ok(url) => {
                        let document = self.source.load_advisory(&url).await;
                        Ok((url, document))
                    }
                    Err(err) => Err(err),
                };
                (file, loaded)
            })
            .buffered(self.concurrency);

        let mut loaded = pin!(loaded);

        while let Some((file, result)) = loaded.next().await {
            let (url, document) = match result {
                Ok(result) => result,
                Err(err) => {
                    self.report
                        .error(format!("Invalid URL {} in feed: {err}.", file.url));
                    continue;
                }
            };

            if !rolie_mask(&url) {
                self.report.error(format!(
                    "{url} does not conform to the file name conventions."
                ));
            }

            let document = match document {
                Ok(document) => document,
                Err(err) if err.is_fatal() => return Err(Error::Source(err)),
                Err(err) => {
                    self.report
                        .error(format!("Failed to load advisory {url}: {err}."));
                    continue;
                }
            };

            let expected = document.expected_file_name();
            let actual = url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default();
            if actual != expected {
                self.report.error(format!(
                    "File name of {url} does not match the tracking ID {id}, expected {expected}.",
                    id = document.document.tracking.id,
                ));
            }

            on_label(document.tlp_label(), &url);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_names() {
        assert!(is_csaf_file_name("example-2023-0001.json"));
        assert!(is_csaf_file_name("rhsa-2023_0001.json"));
        assert!(is_csaf_file_name("a+b.json"));
        assert!(!is_csaf_file_name("RHSA-2023_0001.json"));
        assert!(!is_csaf_file_name("rhsa-2023__0001.json"));
        assert!(!is_csaf_file_name("_a.json"));
        assert!(!is_csaf_file_name(".json"));
        assert!(!is_csaf_file_name("a.json.asc"));
        assert!(!is_csaf_file_name("a b.json"));
        assert!(!is_csaf_file_name("prefix/a.json"));
    }

    #[test]
    fn expected_names_pass_the_mask() {
        use crate::model::advisory::{AdvisoryDocument, Document, Tracking};

        for id in ["RHSA-2023::0001", "Example 2023 0001", "cisco-sa-ipv6"] {
            let document = AdvisoryDocument {
                document: Document {
                    distribution: None,
                    tracking: Tracking { id: id.into() },
                },
            };
            let name = document.expected_file_name();
            assert!(is_csaf_file_name(&name), "{id} -> {name}");
        }
    }

    #[test]
    fn mask() {
        let url = |s: &str| Url::parse(s).expect("test URL must parse");
        assert!(rolie_mask(&url("https://example.com/2023/a-1.json")));
        assert!(!rolie_mask(&url("https://example.com/2023/")));
        assert!(!rolie_mask(&url("https://example.com/2023/A-1.json")));
    }
}
