use crate::core::value::TrackerValue;
use crate::error::PathError;
use std::fmt;

pub const PATH_SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    /// Array position, written as a `[N]` pseudo-segment.
    Index(usize),
}

impl PathSegment {
    fn literal_key(&self) -> String {
        match self {
            Self::Key(key) => key.clone(),
            Self::Index(index) => format!("[{index}]"),
        }
    }
}

/// Structural address into the tracker object, e.g. `Enemies.goblin1.[0].hp`.
///
/// The same string form keys collapse state, render nodes and write-back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Splits on `.`; segments shaped like `[N]` become indices.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            return Self::empty();
        }
        let segments = input.split(PATH_SEPARATOR).map(parse_segment).collect();
        Self::new(segments)
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self::new(segments)
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self::new(segments)
    }

    /// Rejects keys that would not survive a display/parse round trip.
    pub fn validate(&self) -> Result<(), PathError> {
        if self.segments.is_empty() {
            return Err(PathError::Empty);
        }
        for segment in &self.segments {
            if let PathSegment::Key(key) = segment
                && key.contains(PATH_SEPARATOR)
            {
                return Err(PathError::UnsupportedKey { key: key.clone() });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            match segment {
                PathSegment::Key(key) => f.write_str(key)?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl From<&str> for ValuePath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

fn parse_segment(raw: &str) -> PathSegment {
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']'))
        && !inner.is_empty()
        && inner.bytes().all(|b| b.is_ascii_digit())
        && let Ok(index) = inner.parse::<usize>()
    {
        return PathSegment::Index(index);
    }
    PathSegment::Key(raw.to_string())
}

fn step<'a>(current: &'a TrackerValue, segment: &PathSegment) -> Option<&'a TrackerValue> {
    match (current, segment) {
        (TrackerValue::Object(map), PathSegment::Key(key)) => map.get(key.as_str()),
        (TrackerValue::List(list), PathSegment::Index(index)) => list.get(*index),
        // Unresolved index pseudo-segments are plain object keys.
        (TrackerValue::Object(map), PathSegment::Index(_)) => {
            map.get(segment.literal_key().as_str())
        }
        _ => None,
    }
}

/// Reads the value at `path`. Missing keys and non-container intermediates
/// yield `None`; the empty path addresses nothing.
pub fn read<'a>(root: &'a TrackerValue, path: &ValuePath) -> Option<&'a TrackerValue> {
    if path.is_empty() {
        return None;
    }
    path.segments()
        .iter()
        .try_fold(root, |current, segment| step(current, segment))
}

/// Steps into `segment`, creating an object container when the current value
/// is missing or scalar. Lists are only entered by an in-range index; any
/// other segment on a list yields `None` and the list is left untouched.
fn descend<'a>(
    current: &'a mut TrackerValue,
    segment: &PathSegment,
) -> Option<&'a mut TrackerValue> {
    if !matches!(current, TrackerValue::Object(_) | TrackerValue::List(_)) {
        *current = TrackerValue::empty_object();
    }
    match current {
        TrackerValue::List(list) => match segment {
            PathSegment::Index(index) => list.get_mut(*index),
            PathSegment::Key(_) => None,
        },
        TrackerValue::Object(map) => Some(map.entry(segment.literal_key()).or_default()),
        _ => None,
    }
}

/// Writes `value` at `path`, creating plain-object containers for missing or
/// scalar intermediates. Returns `false` without modifying anything when the
/// path is empty or crosses a list it cannot address (an index past the end
/// or a key segment).
pub fn write(root: &mut TrackerValue, path: &ValuePath, value: TrackerValue) -> bool {
    if path.is_empty() || !addressable(root, path) {
        return false;
    }

    let mut current = root;
    for segment in path.segments() {
        current = match descend(current, segment) {
            Some(next) => next,
            None => {
                tracing::debug!(path = %path, "write crosses an unaddressable list");
                return false;
            }
        };
    }
    *current = value;
    true
}

/// Whether every list on the existing prefix of `path` can be entered, so a
/// write never stops halfway after creating containers.
fn addressable(root: &TrackerValue, path: &ValuePath) -> bool {
    let mut current = root;
    for segment in path.segments() {
        match (current, segment) {
            (TrackerValue::List(list), PathSegment::Index(index)) => match list.get(*index) {
                Some(item) => current = item,
                None => {
                    tracing::debug!(path = %path, index, "list index out of range");
                    return false;
                }
            },
            (TrackerValue::List(_), PathSegment::Key(key)) => {
                tracing::debug!(path = %path, key = %key, "key segment on a list");
                return false;
            }
            (TrackerValue::Object(_), _) => match step(current, segment) {
                Some(next) => current = next,
                None => return true,
            },
            _ => return true,
        }
    }
    true
}
