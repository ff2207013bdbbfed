/// Sex used when the request does not name one.
pub const DEFAULT_SEX: &str = "male";

/// Prefix marking a `body` value as a plain body color.
pub const BODY_COLOR_PREFIX: &str = "Body_color_";

/// Prefix marking a `head` value as a human head.
pub const HUMAN_HEAD_PREFIX: &str = "Human_";

/// Human head body-type modifiers that are not part of the variant.
pub const HEAD_BODY_MODIFIERS: [&str; 3] = ["plump", "gaunt", "small"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ordered request parameters (`name=value` pairs).
///
/// Keys are unique; inserting an existing key replaces its value in place.
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Pairs in insertion order, including empty values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Requested sex, defaulting to [`DEFAULT_SEX`].
    pub fn sex(&self) -> &str {
        self.get("sex")
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SEX)
    }

    /// Start from `defaults` and let every pair of `self` override them.
    pub fn with_defaults(&self, defaults: &[(&str, &str)]) -> Self {
        let mut out: Self = defaults.iter().copied().collect();
        for (k, v) in self.iter() {
            out.insert(k, v);
        }
        out
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

/// Map body-shape sexes onto the base sex whose assets they share.
pub fn effective_sex(sex: &str) -> &str {
    match sex {
        "teen" | "pregnant" => "female",
        "muscular" => "male",
        other => other,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Why a parameter contributes no layers.
pub enum SkipReason {
    /// Modifier such as `sex`, never drawn itself.
    Modifier,
    /// Empty value.
    Empty,
    /// Explicit `none_*` selection.
    NoneSelection,
    /// `body` value that is not a plain body color.
    UnsupportedBody,
    /// `Human_` head value without type, sex and variant.
    MalformedHead,
}

impl SkipReason {
    /// Whether the value was malformed rather than deliberately empty.
    pub fn is_malformed(self) -> bool {
        matches!(self, Self::UnsupportedBody | Self::MalformedHead)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A parsed `Human_<sex>[_<modifier>]_<variant>` head value.
pub struct HumanHead {
    /// Head type lowercased (`human`).
    pub head_type: String,
    /// Sex segment of the value.
    pub sex: String,
    /// Body-type modifier (`plump`, `gaunt`, `small`), if present.
    pub modifier: Option<String>,
    /// Color variant.
    pub variant: String,
}

impl HumanHead {
    /// Parse a head value; `None` if it is malformed.
    pub fn parse(value: &str) -> Option<Self> {
        let parts: Vec<&str> = value.split('_').collect();
        let [head_type, sex, rest @ ..] = parts.as_slice() else {
            return None;
        };
        if head_type.is_empty() || sex.is_empty() || rest.is_empty() {
            return None;
        }

        let (modifier, variant_parts) = match rest {
            [first, tail @ ..] if HEAD_BODY_MODIFIERS.contains(first) => {
                (Some((*first).to_string()), tail)
            }
            _ => (None, rest),
        };
        let variant = variant_parts.join("_");
        if variant.is_empty() {
            return None;
        }

        Some(Self {
            head_type: head_type.to_lowercase(),
            sex: (*sex).to_string(),
            modifier,
            variant,
        })
    }

    /// Component path holding the head's files; the modifier does not change it.
    pub fn component_path(&self) -> String {
        format!("head/heads/{}/{}/", self.head_type, self.sex)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// How one request parameter is turned into layers.
pub enum ParamKind<'a> {
    /// `body=Body_color_<variant>`; drawn without a catalog lookup.
    Body {
        /// Body color.
        variant: &'a str,
    },
    /// `head=Human_...`; drawn without a catalog lookup.
    HumanHead(HumanHead),
    /// Any other head species; resolved like a generic parameter.
    OtherHead,
    /// Catalog-driven equipment or feature.
    Generic,
    /// Contributes nothing.
    Skip(SkipReason),
}

impl ParamKind<'_> {
    /// Whether the parameter goes through the catalog.
    pub fn uses_catalog(&self) -> bool {
        matches!(self, Self::OtherHead | Self::Generic)
    }
}

/// Classify a request parameter once, before any lookups.
pub fn classify<'a>(param: &str, value: &'a str) -> ParamKind<'a> {
    if param == "sex" {
        return ParamKind::Skip(SkipReason::Modifier);
    }
    if value.is_empty() {
        return ParamKind::Skip(SkipReason::Empty);
    }
    if param == "body" {
        return match value.strip_prefix(BODY_COLOR_PREFIX) {
            Some(variant) if !variant.is_empty() => ParamKind::Body { variant },
            _ => ParamKind::Skip(SkipReason::UnsupportedBody),
        };
    }
    if param == "head" && value.starts_with(HUMAN_HEAD_PREFIX) {
        return match HumanHead::parse(value) {
            Some(head) => ParamKind::HumanHead(head),
            None => ParamKind::Skip(SkipReason::MalformedHead),
        };
    }
    if is_none_selection(value) {
        return ParamKind::Skip(SkipReason::NoneSelection);
    }
    if param == "head" {
        return ParamKind::OtherHead;
    }
    ParamKind::Generic
}

/// `none_*` (any case) marks an explicit "nothing selected".
pub fn is_none_selection(value: &str) -> bool {
    value
        .get(..5)
        .is_some_and(|p| p.eq_ignore_ascii_case("none_"))
}

#[cfg(test)]
#[path = "../../tests/unit/assemble/params.rs"]
mod tests;
