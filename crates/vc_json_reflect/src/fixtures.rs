//! Classes shared by unit tests.

use core::fmt;

use crate::impl_class;
use crate::info::{Modifiers, Visibility};

pub(crate) struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub password: String,
    pub scratch: Vec<u8>,
}

impl Person {
    pub fn new(first_name: &str, last_name: &str, age: u32) -> Self {
        Self {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            age,
            password: "hunter2".to_owned(),
            scratch: Vec::new(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

impl_class!(Person, |class| class
    .field::<String>("firstName", Visibility::Public, |p| &p.first_name)
    .field::<String>("lastName", Visibility::Public, |p| &p.last_name)
    .field::<u32>("age", Visibility::Private, |p| &p.age)
    .field::<String>("password", Visibility::Private, |p| &p.password)
    .field_flagged::<Vec<u8>>("scratch", Visibility::Public, Modifiers::TRANSIENT, |p| &p.scratch)
    .getter::<u64>("getAge", Visibility::Public, |p| Ok(u64::from(p.age)))
    .getter::<String>("getFullName", Visibility::Public, |p| Ok(p.to_string()))
    .render_with_display());

pub(crate) struct Employee {
    pub base: Person,
    pub company: String,
}

impl_class!(Employee, |class| class
    .extends::<Person>(|e| &e.base)
    .field::<String>("company", Visibility::Public, |e| &e.company));

pub(crate) struct Gadget {
    pub label: String,
    pub tags: Vec<String>,
}

impl_class!(Gadget, |class| class
    .field::<String>("label", Visibility::Public, |g| &g.label)
    .field::<Vec<String>>("tags", Visibility::Private, |g| &g.tags)
    .getter::<String>("getTags", Visibility::Public, |g| Ok(g.tags.join(","))));
