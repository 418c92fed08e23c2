//! Dependency range minimization and the downgrade rewrite
//!
//! Computes, for every declared dependency range, the lowest concrete
//! version that satisfies it, then rewrites a manifest so an install against
//! it exercises the project's claimed minimum-supported versions.

use crate::core::error::{DowngradeError, Result};
use crate::core::types::DependencyMap;
use crate::manifest::PackageManifest;
use semver::{Comparator, Op, Prerelease, Version, VersionReq};

/// Suffix marking a rewritten manifest's version as a downgrade-test build
pub const VERSION_SUFFIX: &str = "-downgraded-build";

/// Compute the minimum concrete version satisfying an npm version range.
///
/// Supports `||` alternatives, whitespace-ANDed comparator sets, hyphen
/// ranges, `=`/`<`/`<=`/`>`/`>=` primitives, carets, tildes, x-ranges,
/// partial versions, `*` and the empty range. Returns `None` when the range
/// cannot be parsed or nothing satisfies it.
pub fn minimum_version(range: &str) -> Option<Version> {
    let range = range.trim();

    let mut best: Option<Version> = None;
    for alternative in range.split("||") {
        // One unparsable alternative invalidates the whole range.
        let req = parse_range(alternative)?;
        if let Some(floor) = lowest_matching(&req) {
            best = match best {
                Some(current) if current <= floor => Some(current),
                _ => Some(floor),
            };
        }
    }

    best
}

/// Replace every range in a dependency mapping with its minimum version.
///
/// A range with no computable minimum is a configuration error and fails
/// the whole operation; a snapshot with an undefined floor is meaningless.
pub fn minimize(deps: &DependencyMap) -> Result<DependencyMap> {
    let mut minimized = DependencyMap::with_capacity(deps.len());

    for (name, range) in deps {
        let version = minimum_version(range)
            .ok_or_else(|| DowngradeError::no_minimum_version(name, range))?;
        minimized.insert(name.clone(), version.to_string());
    }

    Ok(minimized)
}

/// Rewrite a manifest for a lowest-supported-versions build.
///
/// Minimizes every dependency block, merges the minimized peer entries into
/// the development dependencies (peer values win), forces the union of
/// runtime and development minimums onto the whole tree via `overrides`,
/// and marks the version as a downgrade-test build. All other fields pass
/// through untouched.
pub fn downgrade(manifest: &PackageManifest) -> Result<PackageManifest> {
    let dependencies = manifest.dependencies.as_ref().map(minimize).transpose()?;
    let mut dev_dependencies = manifest
        .dev_dependencies
        .as_ref()
        .map(minimize)
        .transpose()?;
    let peer_dependencies = manifest
        .peer_dependencies
        .as_ref()
        .map(minimize)
        .transpose()?;

    // The scratch install has to resolve peers itself, so they double as
    // development dependencies.
    if let Some(peers) = &peer_dependencies {
        let dev = dev_dependencies.get_or_insert_with(DependencyMap::new);
        for (name, version) in peers {
            dev.insert(name.clone(), version.clone());
        }
    }

    let mut overrides = DependencyMap::new();
    if let Some(deps) = &dependencies {
        overrides.extend(deps.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    if let Some(dev) = &dev_dependencies {
        overrides.extend(dev.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let version = format!(
        "{}{}",
        manifest.version.as_deref().unwrap_or("0"),
        VERSION_SUFFIX
    );

    Ok(PackageManifest {
        version: Some(version),
        dependencies,
        dev_dependencies,
        peer_dependencies,
        overrides: Some(overrides),
        extra: manifest.extra.clone(),
    })
}

/// Translate one npm range alternative into a comparator list
fn parse_range(alternative: &str) -> Option<VersionReq> {
    let alternative = alternative.trim();
    if alternative.is_empty() {
        return Some(VersionReq::STAR);
    }

    let tokens: Vec<&str> = alternative
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    // Hyphen range: `1.2.3 - 2.0.0` is an inclusive interval.
    if tokens.len() == 3 && tokens[1] == "-" {
        return VersionReq::parse(&format!(">={}, <={}", tokens[0], tokens[2])).ok();
    }

    VersionReq::parse(&tokens.join(", ")).ok()
}

/// Lowest version satisfying a comparator set, if any.
///
/// The candidate is the greatest lower bound over the set's comparators,
/// then verified against the whole set so contradictory ranges yield
/// nothing.
fn lowest_matching(req: &VersionReq) -> Option<Version> {
    let mut floor = Version::new(0, 0, 0);

    for comparator in &req.comparators {
        let bound = comparator_floor(comparator);
        if bound > floor {
            floor = bound;
        }
    }

    req.matches(&floor).then_some(floor)
}

/// Inclusive lower bound contributed by a single comparator
fn comparator_floor(comparator: &Comparator) -> Version {
    let mut version = Version::new(
        comparator.major,
        comparator.minor.unwrap_or(0),
        comparator.patch.unwrap_or(0),
    );
    version.pre = comparator.pre.clone();

    match comparator.op {
        Op::Greater => {
            // Exclusive bound: the floor is the next version representable
            // at the comparator's precision.
            if comparator.patch.is_some() {
                version.patch += 1;
            } else if comparator.minor.is_some() {
                version.minor += 1;
                version.patch = 0;
            } else {
                version.major += 1;
                version.minor = 0;
                version.patch = 0;
            }
            version.pre = Prerelease::EMPTY;
            version
        },
        // Upper bounds impose no lower bound of their own.
        Op::Less | Op::LessEq => Version::new(0, 0, 0),
        _ => version,
    }
}
