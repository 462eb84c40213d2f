//! Generators for property tests.

use quickcheck::{Arbitrary, Gen};

const HOSTS: &[&str] = &[
    "",
    "docker.io",
    "index.docker.io",
    "localhost",
    "localhost:5000",
    "quay.io",
    "registry.example.com:443",
];

const SEGMENTS: &[&str] = &[
    "library",
    "debian",
    "team",
    "app",
    "foo.bar",
    "a-b",
    "x_y",
    "localhost",
];

const TAGS: &[&str] = &["latest", "8.2", "v1.0-rc1", "stable_x"];

const DIGEST: &str = "sha256:6c3c624b58dbbcd3c0dd82b4c53f04194d1247c6eebdaab7c610cf7d66709b3b";

/// A grammatically valid, lowercase repository name, with or without a
/// registry hostname.
#[derive(Debug, Clone)]
pub(crate) struct RepoName(pub(crate) String);

impl Arbitrary for RepoName {
    fn arbitrary(g: &mut Gen) -> Self {
        let host = g.choose(HOSTS).copied().unwrap_or_default();
        let n = 1 + usize::arbitrary(g) % 3;
        let path = (0..n)
            .map(|_| g.choose(SEGMENTS).copied().unwrap_or("app"))
            .collect::<Vec<_>>()
            .join("/");
        if host.is_empty() {
            Self(path)
        } else {
            Self(format!("{host}/{path}"))
        }
    }
}

/// A full reference string: a [`RepoName`] with an optional tag or digest
/// and an optional URL scheme.
#[derive(Debug, Clone)]
pub(crate) struct RefString(pub(crate) String);

impl Arbitrary for RefString {
    fn arbitrary(g: &mut Gen) -> Self {
        let name = RepoName::arbitrary(g).0;
        let scheme = g
            .choose(&["", "http://", "https://"])
            .copied()
            .unwrap_or_default();
        let suffix = match u8::arbitrary(g) % 3 {
            0 => String::new(),
            1 => format!(":{}", g.choose(TAGS).copied().unwrap_or("latest")),
            _ => format!("@{DIGEST}"),
        };
        Self(format!("{scheme}{name}{suffix}"))
    }
}
