//! Badge images for the README and documentation shields table.
//!
//! Each [`Shield`] renders as the body of a reST substitution definition,
//! the part that follows `.. |name| `:
//!
//! ```text
//! image:: https://img.shields.io/pypi/v/hello-world
//! 	:target: https://pypi.org/project/hello-world/
//! 	:alt: PyPI - Package Version
//! ```

use crate::config::Config;
use std::collections::BTreeMap;
use std::fmt;

const SHIELDS_IO: &str = "https://img.shields.io";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shield {
    pub image: String,
    /// Page the badge links to. Badges without one are plain images.
    pub target: Option<String>,
    pub alt: &'static str,
}

impl Shield {
    fn linked(image: String, target: String, alt: &'static str) -> Self {
        Self {
            image,
            target: Some(target),
            alt,
        }
    }
}

impl fmt::Display for Shield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image:: {}", self.image)?;
        if let Some(target) = &self.target {
            write!(f, "\n\t:target: {}", target)?;
        }
        write!(f, "\n\t:alt: {}", self.alt)
    }
}

/// Status badge of a GitHub Actions workflow.
fn workflow(github: &str, name: &str, alt: &'static str) -> Shield {
    Shield::linked(
        format!("{}/workflows/{}/badge.svg", github, name.replace(' ', "%20")),
        format!(
            "{}/actions?query=workflow%3A%22{}%22",
            github,
            name.replace(' ', "+")
        ),
        alt,
    )
}

/// Every shield for `config`, keyed by the name templates use after `shields.`.
///
/// `year` is the year the "maintained" badge vouches for.
pub fn shields(config: &Config, year: i32) -> BTreeMap<&'static str, Shield> {
    let user = config.username.as_str();
    let repo = config.repo_name();
    let pypi = config.pypi_name();
    let docker = config.docker_name();
    let rtfd = repo.to_lowercase();

    let github = format!("https://github.com/{}/{}", user, repo);
    let pypi_page = format!("https://pypi.org/project/{}", pypi);
    let conda_page = format!("https://anaconda.org/{}/{}", user, pypi);
    let docker_page = format!("https://hub.docker.com/r/{}/{}", user, docker);

    let travis_image = match config.travis_site.as_str() {
        "org" => format!("{}/travis/{}/{}/master?logo=travis", SHIELDS_IO, user, repo),
        site => format!(
            "{}/travis/{}/{}/{}/master?logo=travis",
            SHIELDS_IO, site, user, repo
        ),
    };

    BTreeMap::from([
        (
            "docs",
            Shield::linked(
                format!("{}/readthedocs/{}/latest?logo=read-the-docs", SHIELDS_IO, rtfd),
                format!("https://{}.readthedocs.io/en/latest/?badge=latest", rtfd),
                "Documentation Build Status",
            ),
        ),
        (
            "docs_check",
            workflow(&github, "Docs Check", "Docs Check Status"),
        ),
        (
            "travis",
            Shield::linked(
                travis_image,
                format!("https://travis-ci.{}/{}/{}", config.travis_site, user, repo),
                "Travis Build Status",
            ),
        ),
        (
            "actions_windows",
            workflow(&github, "Windows Tests", "Windows Tests Status"),
        ),
        (
            "actions_macos",
            workflow(&github, "macOS Tests", "macOS Tests Status"),
        ),
        (
            "requires",
            Shield::linked(
                format!(
                    "https://requires.io/github/{}/{}/requirements.svg?branch=master",
                    user, repo
                ),
                format!(
                    "https://requires.io/github/{}/{}/requirements/?branch=master",
                    user, repo
                ),
                "Requirements Status",
            ),
        ),
        (
            "coveralls",
            Shield::linked(
                format!(
                    "{}/coveralls/github/{}/{}/master?logo=coveralls",
                    SHIELDS_IO, user, repo
                ),
                format!("https://coveralls.io/github/{}/{}?branch=master", user, repo),
                "Coverage",
            ),
        ),
        (
            "codefactor",
            Shield::linked(
                format!("{}/codefactor/grade/github/{}/{}?logo=codefactor", SHIELDS_IO, user, repo),
                format!("https://www.codefactor.io/repository/github/{}/{}", user, repo),
                "CodeFactor Grade",
            ),
        ),
        (
            "pypi_version",
            Shield::linked(
                format!("{}/pypi/v/{}", SHIELDS_IO, pypi),
                pypi_page.clone(),
                "PyPI - Package Version",
            ),
        ),
        (
            "supported_versions",
            Shield::linked(
                format!("{}/pypi/pyversions/{}?logo=python&logoColor=white", SHIELDS_IO, pypi),
                pypi_page.clone(),
                "PyPI - Supported Python Versions",
            ),
        ),
        (
            "supported_implementations",
            Shield::linked(
                format!("{}/pypi/implementation/{}", SHIELDS_IO, pypi),
                pypi_page.clone(),
                "PyPI - Supported Implementations",
            ),
        ),
        (
            "wheel",
            Shield::linked(
                format!("{}/pypi/wheel/{}", SHIELDS_IO, pypi),
                pypi_page,
                "PyPI - Wheel",
            ),
        ),
        (
            "conda_version",
            Shield::linked(
                format!("{}/conda/v/{}/{}?logo=anaconda", SHIELDS_IO, user, pypi),
                conda_page.clone(),
                "Conda - Package Version",
            ),
        ),
        (
            "conda_platform",
            Shield::linked(
                format!("{}/conda/pn/{}/{}?label=conda%7Cplatform", SHIELDS_IO, user, pypi),
                conda_page,
                "Conda - Platform",
            ),
        ),
        (
            "license",
            Shield::linked(
                format!("{}/github/license/{}/{}", SHIELDS_IO, user, repo),
                format!("{}/blob/master/LICENSE", github),
                "License",
            ),
        ),
        (
            "language",
            Shield {
                image: format!("{}/github/languages/top/{}/{}", SHIELDS_IO, user, repo),
                target: None,
                alt: "GitHub top language",
            },
        ),
        (
            "commits_since",
            Shield::linked(
                format!(
                    "{}/github/commits-since/{}/{}/v{}",
                    SHIELDS_IO, user, repo, config.version
                ),
                format!("{}/pulse", github),
                "GitHub commits since tagged version",
            ),
        ),
        (
            "commits_latest",
            Shield::linked(
                format!("{}/github/last-commit/{}/{}", SHIELDS_IO, user, repo),
                format!("{}/commit/master", github),
                "GitHub last commit",
            ),
        ),
        (
            "maintained",
            Shield {
                image: format!("{}/maintenance/yes/{}", SHIELDS_IO, year),
                target: None,
                alt: "Maintenance",
            },
        ),
        (
            "docker_build",
            Shield::linked(
                format!("{}/docker/cloud/build/{}/{}?label=build&logo=docker", SHIELDS_IO, user, docker),
                docker_page.clone(),
                "Docker Hub Build Status",
            ),
        ),
        (
            "docker_automated",
            Shield::linked(
                format!("{}/docker/cloud/automated/{}/{}?label=build&logo=docker", SHIELDS_IO, user, docker),
                docker_page.clone(),
                "Docker Hub Automated build",
            ),
        ),
        (
            "docker_size",
            Shield::linked(
                format!("{}/docker/image-size/{}/{}?label=image%20size&logo=docker", SHIELDS_IO, user, docker),
                docker_page,
                "Docker Image Size",
            ),
        ),
        (
            "pre_commit",
            Shield::linked(
                format!("{}/badge/pre--commit-enabled-brightgreen?logo=pre-commit&logoColor=white", SHIELDS_IO),
                "https://github.com/pre-commit/pre-commit".to_string(),
                "pre-commit",
            ),
        ),
    ])
}
