//! Tag selection.
//!
//! A [`TagFilter`] is built once from a [`FilterConfig`] and answers, per
//! semantic group, whether a group or tag must be parsed and whether it must
//! be returned. Parsing is a superset of returning: a derived group such as
//! `composite` or `gps` pulls in the raw tags it is computed from, and the
//! directory pointers needed to reach them, without returning them.
//!
//! # Configuration shape
//!
//! ```json
//! {
//!   "includeTags": { "exif": ["DateTimeOriginal", 271], "gps": true },
//!   "excludeTags": { "xmp": true }
//! }
//! ```
//!
//! A group value is `true` (all tags), `false` (same as absent) or a list of
//! tag names and, for ID-capable groups, numeric tag codes. An explicit empty
//! list returns nothing for that group. When `includeTags` is present, groups
//! it does not mention return nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

// =============================================================================
// Group
// =============================================================================

/// Semantic groups governed by the filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Group {
    Exif,
    Iptc,
    Xmp,
    Icc,
    Photoshop,
    MakerNotes,
    Mpf,
    File,
    Jfif,
    Png,
    Riff,
    Gif,
    Gps,
    Composite,
    Thumbnail,
}

impl Group {
    pub const ALL: [Group; 15] = [
        Group::Exif,
        Group::Iptc,
        Group::Xmp,
        Group::Icc,
        Group::Photoshop,
        Group::MakerNotes,
        Group::Mpf,
        Group::File,
        Group::Jfif,
        Group::Png,
        Group::Riff,
        Group::Gif,
        Group::Gps,
        Group::Composite,
        Group::Thumbnail,
    ];

    /// Configuration key of the group.
    pub const fn as_str(self) -> &'static str {
        match self {
            Group::Exif => "exif",
            Group::Iptc => "iptc",
            Group::Xmp => "xmp",
            Group::Icc => "icc",
            Group::Photoshop => "photoshop",
            Group::MakerNotes => "makerNotes",
            Group::Mpf => "mpf",
            Group::File => "file",
            Group::Jfif => "jfif",
            Group::Png => "png",
            Group::Riff => "riff",
            Group::Gif => "gif",
            Group::Gps => "gps",
            Group::Composite => "composite",
            Group::Thumbnail => "thumbnail",
        }
    }

    /// Parse a configuration key. Returns `None` for ungoverned groups.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.as_str() == name)
    }

    /// Whether selectors for this group may name tags by numeric code.
    pub const fn supports_ids(self) -> bool {
        matches!(
            self,
            Group::Exif | Group::Iptc | Group::Photoshop | Group::Mpf | Group::MakerNotes
        )
    }

    /// Groups that can only be reached by decoding the Exif directory tree.
    const fn requires_exif(self) -> bool {
        matches!(
            self,
            Group::Iptc
                | Group::Xmp
                | Group::Icc
                | Group::Photoshop
                | Group::MakerNotes
                | Group::Thumbnail
                | Group::Gps
                | Group::Composite
        )
    }

    /// Exif tags a derived group is computed from.
    const fn exif_dependencies(self) -> &'static [&'static str] {
        match self {
            Group::Iptc => &["IPTC-NAA"],
            Group::Xmp => &["ApplicationNotes"],
            Group::Icc => &["ICC_Profile"],
            Group::Photoshop => &["ImageSourceData", "PhotoshopSettings"],
            Group::MakerNotes => &["MakerNote", "Make"],
            Group::Thumbnail => &["JPEGInterchangeFormat", "JPEGInterchangeFormatLength"],
            Group::Gps => &[
                "GPSLatitude",
                "GPSLatitudeRef",
                "GPSLongitude",
                "GPSLongitudeRef",
                "GPSAltitude",
                "GPSAltitudeRef",
            ],
            Group::Composite => &[
                "FocalLength",
                "FocalPlaneXResolution",
                "FocalPlaneYResolution",
                "FocalPlaneResolutionUnit",
                "FocalLengthIn35mmFilm",
            ],
            _ => &[],
        }
    }
}

/// Directory pointer tags.
pub const EXIF_IFD_POINTER: &str = "Exif IFD Pointer";
pub const GPS_IFD_POINTER: &str = "GPS Info IFD Pointer";
pub const INTEROPERABILITY_IFD_POINTER: &str = "Interoperability IFD Pointer";

/// File tags the composite group is computed from.
const COMPOSITE_FILE_DEPENDENCIES: &[&str] = &["Image Width", "Image Height"];

// =============================================================================
// FilterConfig
// =============================================================================

/// One tag selector: a name, or a numeric tag code.
///
/// Ids above `u16::MAX` are accepted but never match a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagSelector {
    Id(u32),
    Name(String),
}

impl From<&str> for TagSelector {
    fn from(name: &str) -> Self {
        TagSelector::Name(name.to_string())
    }
}

impl From<u16> for TagSelector {
    fn from(id: u16) -> Self {
        TagSelector::Id(id.into())
    }
}

/// Per-group selection value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagSpec {
    /// `true` selects every tag; `false` is the same as leaving the group out
    Flag(bool),
    List(Vec<TagSelector>),
}

impl TagSpec {
    /// Build a list spec from names and/or ids.
    pub fn list<I, T>(selectors: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagSelector>,
    {
        TagSpec::List(selectors.into_iter().map(Into::into).collect())
    }

    /// `true`, or a non-empty selector list.
    pub fn is_positive(&self) -> bool {
        match self {
            TagSpec::Flag(all) => *all,
            TagSpec::List(selectors) => !selectors.is_empty(),
        }
    }
}

/// Group selection specs keyed by group.
pub type GroupSpecs = BTreeMap<Group, TagSpec>;

/// User-facing filter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_tags: Option<GroupSpecs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<GroupSpecs>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include spec for `group`.
    pub fn include(mut self, group: Group, spec: TagSpec) -> Self {
        self.include_tags.get_or_insert_with(BTreeMap::new).insert(group, spec);
        self
    }

    /// Add an exclude spec for `group`.
    pub fn exclude(mut self, group: Group, spec: TagSpec) -> Self {
        self.exclude_tags.get_or_insert_with(BTreeMap::new).insert(group, spec);
        self
    }

    /// Effective include spec of a group; `false` counts as absent.
    fn included(&self, group: Group) -> Option<&TagSpec> {
        effective(self.include_tags.as_ref(), group)
    }

    fn excluded(&self, group: Group) -> Option<&TagSpec> {
        effective(self.exclude_tags.as_ref(), group)
    }

    fn requests(&self, group: Group) -> bool {
        self.included(group).is_some_and(TagSpec::is_positive)
    }
}

fn effective(specs: Option<&GroupSpecs>, group: Group) -> Option<&TagSpec> {
    specs
        .and_then(|specs| specs.get(&group))
        .filter(|spec| !matches!(spec, TagSpec::Flag(false)))
}

// =============================================================================
// Selection
// =============================================================================

/// Resolved selection for one group and one purpose (parse or return).
///
/// Names are stored lower-cased and matched case-insensitively. Id sets
/// exist only for ID-capable groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub include_all: bool,
    pub include_names: BTreeSet<String>,
    pub include_ids: Option<BTreeSet<u16>>,
    pub exclude_all: bool,
    pub exclude_names: BTreeSet<String>,
    pub exclude_ids: Option<BTreeSet<u16>>,
}

impl Selection {
    fn for_group(group: Group) -> Self {
        let ids = group.supports_ids().then(BTreeSet::new);
        Self {
            include_ids: ids.clone(),
            exclude_ids: ids,
            ..Self::default()
        }
    }

    fn add_includes(&mut self, selectors: &[TagSelector]) {
        for selector in selectors {
            match selector {
                TagSelector::Name(name) => {
                    self.include_names.insert(name.to_lowercase());
                }
                TagSelector::Id(id) => {
                    if let (Some(ids), Ok(id)) = (self.include_ids.as_mut(), u16::try_from(*id)) {
                        ids.insert(id);
                    }
                }
            }
        }
    }

    fn add_excludes(&mut self, spec: Option<&TagSpec>) {
        match spec {
            None => {}
            Some(TagSpec::Flag(_)) => self.exclude_all = true,
            Some(TagSpec::List(selectors)) => {
                for selector in selectors {
                    match selector {
                        TagSelector::Name(name) => {
                            self.exclude_names.insert(name.to_lowercase());
                        }
                        TagSelector::Id(id) => {
                            if let (Some(ids), Ok(id)) =
                                (self.exclude_ids.as_mut(), u16::try_from(*id))
                            {
                                ids.insert(id);
                            }
                        }
                    }
                }
            }
        }
    }

    /// Whether any name or id is positively included.
    pub fn has_positive(&self) -> bool {
        !self.include_names.is_empty() || self.include_ids.as_ref().is_some_and(|ids| !ids.is_empty())
    }

    fn is_excluded(&self, name: &str, id: Option<u16>) -> bool {
        self.exclude_names.contains(&name.to_lowercase())
            || matches!((&self.exclude_ids, id), (Some(ids), Some(id)) if ids.contains(&id))
    }

    fn is_included(&self, name: &str, id: Option<u16>) -> bool {
        self.include_names.contains(&name.to_lowercase())
            || matches!((&self.include_ids, id), (Some(ids), Some(id)) if ids.contains(&id))
    }

    /// Match a tag against this selection.
    pub fn matches(&self, name: &str, id: Option<u16>) -> bool {
        if self.exclude_all || self.is_excluded(name, id) {
            return false;
        }
        if self.include_all || !self.has_positive() {
            return true;
        }
        self.is_included(name, id)
    }
}

// =============================================================================
// TagFilter
// =============================================================================

#[derive(Debug, Clone)]
struct GroupRules {
    returned: Selection,
    parsed: Selection,
}

#[derive(Debug, Clone)]
struct Rules {
    parse_exif: bool,
    parse_file: bool,
    groups: HashMap<Group, GroupRules>,
}

/// Immutable set of parse/return predicates built from a [`FilterConfig`].
///
/// Group arguments are configuration keys (`"exif"`, `"makerNotes"`...).
/// Keys outside the governed set are always parsed and returned.
#[derive(Debug, Clone)]
pub struct TagFilter {
    rules: Option<Rules>,
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl TagFilter {
    /// Filter whose predicates are all unconditionally true.
    pub fn allow_all() -> Self {
        Self { rules: None }
    }

    /// Build the predicates for a configuration.
    pub fn new(config: &FilterConfig) -> Self {
        if config.include_tags.is_none() && config.exclude_tags.is_none() {
            return Self::allow_all();
        }

        let parse_exif = Group::ALL
            .into_iter()
            .any(|group| group.requires_exif() && config.requests(group));
        let parse_file = config.requests(Group::Composite);

        let exif_dependencies = exif_dependencies(config);
        let file_dependencies: BTreeSet<String> =
            if config.requests(Group::Composite) && config.included(Group::File).is_none() {
                COMPOSITE_FILE_DEPENDENCIES.iter().map(|name| name.to_string()).collect()
            } else {
                BTreeSet::new()
            };

        let groups = Group::ALL
            .into_iter()
            .map(|group| {
                let (dependencies, required) = match group {
                    Group::Exif => (&exif_dependencies, parse_exif),
                    Group::File => (&file_dependencies, parse_file),
                    _ => (&EMPTY_NAMES, false),
                };
                let rules = GroupRules {
                    returned: return_selection(config, group),
                    parsed: parse_selection(config, group, dependencies, required),
                };
                (group, rules)
            })
            .collect();

        tracing::debug!(
            parse_exif,
            parse_file,
            exif_dependencies = exif_dependencies.len(),
            "Built tag filter"
        );

        Self {
            rules: Some(Rules {
                parse_exif,
                parse_file,
                groups,
            }),
        }
    }

    /// Whether every predicate is unconditionally true.
    pub fn is_allow_all(&self) -> bool {
        self.rules.is_none()
    }

    pub fn should_return_group(&self, group: &str) -> bool {
        match (&self.rules, Group::from_name(group)) {
            (Some(rules), Some(group)) => rules
                .groups
                .get(&group)
                .is_some_and(|group_rules| !group_rules.returned.exclude_all),
            _ => true,
        }
    }

    pub fn should_parse_group(&self, group: &str) -> bool {
        if self.should_return_group(group) {
            return true;
        }
        match (&self.rules, Group::from_name(group)) {
            (Some(rules), Some(Group::Exif)) => rules.parse_exif,
            (Some(rules), Some(Group::File)) => rules.parse_file,
            _ => false,
        }
    }

    pub fn should_return_tag(&self, group: &str, name: &str, id: Option<u16>) -> bool {
        self.should_return_group(group)
            && self
                .group_rules(group)
                .map_or(true, |rules| rules.returned.matches(name, id))
    }

    pub fn should_parse_tag(&self, group: &str, name: &str, id: Option<u16>) -> bool {
        self.should_parse_group(group)
            && self
                .group_rules(group)
                .map_or(true, |rules| rules.parsed.matches(name, id))
    }

    /// Parse predicate for fields of the thumbnail directory.
    ///
    /// The thumbnail locator tags live there but are requested through the
    /// exif selection.
    pub fn should_parse_thumbnail_tag(&self, name: &str, id: Option<u16>) -> bool {
        self.should_parse_tag(Group::Thumbnail.as_str(), name, id)
            || (Group::Thumbnail.exif_dependencies().contains(&name)
                && self.should_parse_tag(Group::Exif.as_str(), name, id))
    }

    fn group_rules(&self, group: &str) -> Option<&GroupRules> {
        let rules = self.rules.as_ref()?;
        rules.groups.get(&Group::from_name(group)?)
    }
}

impl From<&FilterConfig> for TagFilter {
    fn from(config: &FilterConfig) -> Self {
        Self::new(config)
    }
}

static EMPTY_NAMES: BTreeSet<String> = BTreeSet::new();

/// Exif tags that must be parsed for the requested selectors and groups.
fn exif_dependencies(config: &FilterConfig) -> BTreeSet<String> {
    let mut names = BTreeSet::new();

    if let Some(TagSpec::List(selectors)) = config.included(Group::Exif) {
        if !selectors.is_empty() {
            names.insert(EXIF_IFD_POINTER);
        }
        for selector in selectors {
            let TagSelector::Name(name) = selector else {
                continue;
            };
            let name = name.to_lowercase();
            if name.starts_with("gps") {
                names.insert(GPS_IFD_POINTER);
            }
            if name.starts_with("interoperability") || name.starts_with("relatedimage") {
                names.insert(INTEROPERABILITY_IFD_POINTER);
            }
        }
    }

    for group in Group::ALL {
        if !group.requires_exif() || !config.requests(group) {
            continue;
        }
        names.extend(group.exif_dependencies());
        names.insert(EXIF_IFD_POINTER);
        if group == Group::Gps {
            names.insert(GPS_IFD_POINTER);
        }
    }

    names.into_iter().map(str::to_string).collect()
}

fn return_selection(config: &FilterConfig, group: Group) -> Selection {
    let mut selection = Selection::for_group(group);

    if config.include_tags.is_some() {
        match config.included(group) {
            Some(TagSpec::Flag(_)) => selection.include_all = true,
            Some(TagSpec::List(selectors)) => selection.add_includes(selectors),
            None => {}
        }
        // Explicitly empty, or not requested while includeTags is present
        if !selection.include_all && !selection.has_positive() {
            selection.exclude_all = true;
        }
    }

    selection.add_excludes(config.excluded(group));
    selection
}

fn parse_selection(
    config: &FilterConfig,
    group: Group,
    dependencies: &BTreeSet<String>,
    required: bool,
) -> Selection {
    let mut selection = Selection::for_group(group);

    if config.include_tags.is_some() {
        match config.included(group) {
            Some(TagSpec::Flag(_)) => selection.include_all = true,
            Some(TagSpec::List(selectors)) => selection.add_includes(selectors),
            None if required => selection.include_all = true,
            None => {}
        }
        selection
            .include_names
            .extend(dependencies.iter().map(|name| name.to_lowercase()));

        if !selection.include_all && !selection.has_positive() {
            selection.exclude_all = true;
        }
    }

    selection.add_excludes(config.excluded(group));
    selection
}

// =============================================================================
// Tests
// =============================================================================
