//! Decoded JSON values and the table-shaped object collection.

use alloc::vec::Vec;

use bstr::BString;

/// Positional elements decoded from a JSON array.
pub type Array = Vec<Value>;

/// Any value the codec can decode or encode.
///
/// Numbers split into [`Integer`] and [`Float`] depending on which host
/// parser accepts the literal first, and strings are byte strings: the
/// decoder never validates UTF-8, so whatever bytes the document carried are
/// preserved verbatim.
///
/// # Examples
///
/// ```
/// use jsonlune::{Object, Value};
///
/// let mut object = Object::new();
/// object.insert("kind", "point");
/// object.insert("x", 4);
/// let value = Value::Object(object);
/// assert!(value.is_object());
/// ```
///
/// [`Integer`]: Value::Integer
/// [`Float`]: Value::Float
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(BString),
    Array(Array),
    Object(Object),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(BString::from(v))
    }
}

impl From<alloc::string::String> for Value {
    fn from(v: alloc::string::String) -> Self {
        Self::String(BString::from(v))
    }
}

impl From<BString> for Value {
    fn from(v: BString) -> Self {
        Self::String(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::String(BString::from(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::String(BString::from(v))
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert!(Value::Boolean(true).is_bool());
    /// assert!(!Value::Null.is_bool());
    /// ```
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert!(Value::Integer(42).is_integer());
    /// assert!(!Value::Float(42.0).is_integer());
    /// ```
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is [`Float`].
    ///
    /// [`Float`]: Value::Float
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert!(Value::Float(2.5).is_float());
    /// assert!(!Value::Integer(2).is_float());
    /// ```
    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert!(Value::from("foo").is_string());
    /// assert!(!Value::Null.is_string());
    /// ```
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert!(Value::Array(vec![Value::Null]).is_array());
    /// assert!(!Value::Null.is_array());
    /// ```
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::{Object, Value};
    ///
    /// assert!(Value::Object(Object::new()).is_object());
    /// assert!(!Value::Null.is_object());
    /// ```
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Name of the value's type, as used in codec error messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonlune::Value;
    ///
    /// assert_eq!(Value::Null.type_name(), "null");
    /// assert_eq!(Value::Integer(7).type_name(), "integer");
    /// ```
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(..) => "boolean",
            Self::Integer(..) => "integer",
            Self::Float(..) => "float",
            Self::String(..) => "string",
            Self::Array(..) => "array",
            Self::Object(..) => "object",
        }
    }
}

/// An ordered collection of key/value pairs.
///
/// Entries keep first-insertion order. Inserting a key that is already
/// present overwrites the value in place, so the key keeps the position it
/// first appeared at. A float key without a fractional part is stored as the
/// equivalent integer key.
///
/// Keys are full [`Value`]s: decoding always produces string keys, while
/// values built by hand may also use integer and float keys, which is how
/// the encoder distinguishes sequences from mappings.
///
/// # Examples
///
/// ```
/// use jsonlune::{Object, Value};
///
/// let mut object = Object::new();
/// object.insert("kind", "point");
/// object.insert("x", 4);
/// object.insert("x", 7);
/// assert_eq!(object.len(), 2);
/// assert_eq!(object.get("x"), Some(&Value::Integer(7)));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(Value, Value)>,
}

impl Object {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrows the entries in first-insertion order.
    #[must_use]
    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    /// Stores `value` under `key`, returning the previously stored value.
    ///
    /// An existing key is overwritten in place and keeps its position.
    /// Keys compare after normalization, so `2.0` and `2` address the same
    /// entry:
    ///
    /// ```
    /// use jsonlune::{Object, Value};
    ///
    /// let mut object = Object::new();
    /// object.insert(2.0, "a");
    /// assert_eq!(object.get(2), Some(&Value::String("a".into())));
    /// ```
    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = normalize_key(key.into());
        let value = value.into();
        for (existing, slot) in &mut self.entries {
            if *existing == key {
                return Some(core::mem::replace(slot, value));
            }
        }
        self.entries.push((key, value));
        None
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: impl Into<Value>) -> Option<&Value> {
        let key = normalize_key(key.into());
        self.entries
            .iter()
            .find_map(|(existing, value)| (*existing == key).then_some(value))
    }
}

impl FromIterator<(Value, Value)> for Object {
    /// Collects pairs with [`Object::insert`] semantics: keys normalize and
    /// later duplicates overwrite in place.
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(pairs: I) -> Self {
        let mut object = Self::new();
        for (key, value) in pairs {
            object.insert(key, value);
        }
        object
    }
}

/// 2^63, the first float magnitude whose truncating cast to `i64` is lossy.
const MAX_EXACT_INTEGER: f64 = 9_223_372_036_854_775_808.0;

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn normalize_key(key: Value) -> Value {
    match key {
        Value::Float(f)
            if f % 1.0 == 0.0 && f >= -MAX_EXACT_INTEGER && f < MAX_EXACT_INTEGER =>
        {
            Value::Integer(f as i64)
        }
        other => other,
    }
}
