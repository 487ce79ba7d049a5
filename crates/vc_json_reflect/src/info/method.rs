use core::fmt;
use std::sync::Arc;

use crate::access::{BorrowingInvoker, InvokeAccessor, MethodInvoker};
use crate::info::{JsonFamily, TypeDesc, Typed, Visibility};
use crate::{BoxError, Reflect};

// -----------------------------------------------------------------------------
// MethodInfo

/// A method declared on a class.
///
/// Only methods with an invoker can be called by the mapper. Methods
/// declared without one still take part in name lookup, which lets a class
/// describe its full surface.
#[derive(Clone)]
pub struct MethodInfo {
    name: &'static str,
    visibility: Visibility,
    arity: usize,
    returns: Option<fn() -> &'static TypeDesc>,
    invoker: Option<Arc<dyn InvokeAccessor>>,
}

impl MethodInfo {
    /// Creates a zero-argument getter of `C` returning an owned `T`.
    pub fn getter<C: Reflect, T: Reflect + Typed>(
        name: &'static str,
        visibility: Visibility,
        call: fn(&C) -> Result<T, BoxError>,
    ) -> Self {
        Self {
            name,
            visibility,
            arity: 0,
            returns: Some(T::type_desc),
            invoker: Some(Arc::new(MethodInvoker::new(call))),
        }
    }

    /// Creates a zero-argument getter of `C` returning a reference.
    pub fn getter_ref<C: Reflect, T: Reflect + Typed>(
        name: &'static str,
        visibility: Visibility,
        call: fn(&C) -> &T,
    ) -> Self {
        Self {
            name,
            visibility,
            arity: 0,
            returns: Some(T::type_desc),
            invoker: Some(Arc::new(BorrowingInvoker::new(call))),
        }
    }

    /// Creates a method that is declared but cannot be invoked.
    ///
    /// `returns` is `None` for methods without a result.
    pub const fn declared(
        name: &'static str,
        visibility: Visibility,
        arity: usize,
        returns: Option<fn() -> &'static TypeDesc>,
    ) -> Self {
        Self {
            name,
            visibility,
            arity,
            returns,
            invoker: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Returns the result type, `None` for methods without a result.
    #[inline]
    pub fn returns(&self) -> Option<&'static TypeDesc> {
        self.returns.map(|returns| returns())
    }

    #[inline]
    pub fn invoker(&self) -> Option<&Arc<dyn InvokeAccessor>> {
        self.invoker.as_ref()
    }

    /// Returns the pseudo attribute this method reads, if it is a usable
    /// accessor.
    ///
    /// A usable accessor takes no arguments, has a result, has an invoker
    /// and is named `getX`/`get_x`, or `isX`/`is_x` when the result is in
    /// the boolean family.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_json_reflect::info::{MethodInfo, Visibility};
    ///
    /// let m = MethodInfo::getter::<String, bool>("isEmpty", Visibility::Public, |s| Ok(s.is_empty()));
    /// assert_eq!(m.property_name().as_deref(), Some("empty"));
    ///
    /// let m = MethodInfo::getter::<String, usize>("isLong", Visibility::Public, |s| Ok(s.len()));
    /// assert_eq!(m.property_name(), None);
    /// ```
    pub fn property_name(&self) -> Option<String> {
        if self.arity != 0 || self.invoker.is_none() {
            return None;
        }
        let returns = self.returns()?;
        match returns.family() {
            JsonFamily::Null => None,
            family => property_name(self.name, family == JsonFamily::Boolean),
        }
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("arity", &self.arity)
            .field("returns", &self.returns())
            .field("invocable", &self.invoker.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Naming

/// Derives a pseudo attribute name from a getter name.
///
/// `get_first_name` gives `first_name`, `getFirstName` gives `firstName`.
/// A run of capitals is kept as is: `getURL` gives `URL`.
pub fn property_name(method: &str, boolean: bool) -> Option<String> {
    let prefixes: &[&str] = if boolean { &["get", "is"] } else { &["get"] };

    prefixes.iter().find_map(|&prefix| {
        let rest = method.strip_prefix(prefix)?;
        if let Some(snake) = rest.strip_prefix('_') {
            return (!snake.is_empty()).then(|| snake.to_owned());
        }
        rest.starts_with(|c: char| c.is_uppercase())
            .then(|| decapitalize(rest))
    })
}

fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    let (Some(first), second) = (chars.next(), chars.next()) else {
        return String::new();
    };
    if second.is_some_and(char::is_uppercase) {
        return name.to_owned();
    }
    let mut out = String::with_capacity(name.len());
    out.extend(first.to_lowercase());
    out.push_str(&name[first.len_utf8()..]);
    out
}

#[cfg(test)]
mod tests {
    use super::property_name;

    #[test]
    fn getter_naming() {
        assert_eq!(property_name("getFirstName", false).as_deref(), Some("firstName"));
        assert_eq!(property_name("get_first_name", false).as_deref(), Some("first_name"));
        assert_eq!(property_name("getURL", false).as_deref(), Some("URL"));
        assert_eq!(property_name("getX", false).as_deref(), Some("x"));
        assert_eq!(property_name("get", false), None);
        assert_eq!(property_name("get_", false), None);
        assert_eq!(property_name("getaway", false), None);
        assert_eq!(property_name("compute", false), None);
    }

    #[test]
    fn is_prefix_requires_boolean() {
        assert_eq!(property_name("isActive", true).as_deref(), Some("active"));
        assert_eq!(property_name("is_active", true).as_deref(), Some("active"));
        assert_eq!(property_name("isActive", false), None);
        assert_eq!(property_name("getActive", true).as_deref(), Some("active"));
    }
}
