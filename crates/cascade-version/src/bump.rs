use cascade_core::BumpType;
use semver::{BuildMetadata, Prerelease, Version};

/// Applies a bump to a version. Pre-release and build metadata are dropped,
/// `BumpType::None` returns the version unchanged. Components saturate at
/// `u64::MAX` instead of wrapping.
#[must_use]
pub fn bump_version(version: &Version, bump_type: BumpType) -> Version {
    let mut new_version = version.clone();

    match bump_type {
        BumpType::None => return new_version,
        BumpType::Major => {
            new_version.major = new_version.major.saturating_add(1);
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpType::Minor => {
            new_version.minor = new_version.minor.saturating_add(1);
            new_version.patch = 0;
        }
        BumpType::Patch => {
            new_version.patch = new_version.patch.saturating_add(1);
        }
    }

    new_version.pre = Prerelease::EMPTY;
    new_version.build = BuildMetadata::EMPTY;
    new_version
}

#[must_use]
pub fn max_bump_type<'a>(bumps: impl IntoIterator<Item = &'a BumpType>) -> BumpType {
    bumps.into_iter().copied().max().unwrap_or_default()
}
