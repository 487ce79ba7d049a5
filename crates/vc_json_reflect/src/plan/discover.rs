use std::sync::Arc;

use crate::UnresolvedAttribute;
use crate::access::Upcast;
use crate::info::{AttributeInfo, ClassInfo, MethodInfo, Visibility};
use crate::plan::{Accessor, AccessorKind, AttributePlan, is_compatible};
use crate::policy::ClassReflectSpec;

// -----------------------------------------------------------------------------
// Catalog

type Via = Arc<[Arc<dyn Upcast>]>;

struct Member<T: 'static> {
    info: &'static T,
    via: Via,
}

/// Attributes and accessors of a class and its ancestors, most derived
/// first, one entry per name.
struct Catalog {
    attributes: Vec<Member<AttributeInfo>>,
    accessors: Vec<(String, Member<MethodInfo>)>,
}

impl Catalog {
    fn collect(class: &'static ClassInfo) -> Self {
        let mut attributes: Vec<Member<AttributeInfo>> = Vec::new();
        let mut accessors: Vec<(String, Member<MethodInfo>)> = Vec::new();
        let mut via: Via = Arc::from([]);

        for current in class.lineage() {
            for info in current.attributes() {
                if !attributes.iter().any(|known| known.info.name() == info.name()) {
                    let via = via.clone();
                    attributes.push(Member { info, via });
                }
            }

            for info in current.methods() {
                let Some(property) = info.property_name() else {
                    continue;
                };
                if !accessors.iter().any(|(known, _)| *known == property) {
                    let via = via.clone();
                    accessors.push((property, Member { info, via }));
                }
            }

            if let Some(link) = current.parent_link() {
                via = via.iter().cloned().chain([link.upcast().clone()]).collect();
            }
        }

        Self {
            attributes,
            accessors,
        }
    }

    fn attribute(&self, name: &str) -> Option<&Member<AttributeInfo>> {
        self.attributes.iter().find(|member| member.info.name() == name)
    }

    fn accessor(&self, name: &str) -> Option<&Member<MethodInfo>> {
        self.accessors
            .iter()
            .find_map(|(property, member)| (property == name).then_some(member))
    }

    /// Attribute names, then names only reachable through an accessor.
    fn declaration_order(&self) -> impl Iterator<Item = &str> {
        let attributes = self.attributes.iter().map(|member| member.info.name());
        let pseudo = self
            .accessors
            .iter()
            .map(|(property, _)| property.as_str())
            .filter(move |property| self.attribute(property).is_none());
        attributes.chain(pseudo)
    }
}

// -----------------------------------------------------------------------------
// discover

/// Discovers which attributes of `class` to map and how to read them.
///
/// Selection:
/// - with explicit names in `spec`: exactly those names, ignoring
///   `threshold`. Every name must resolve.
/// - otherwise: the serializable attributes.
///
/// Both selections are emitted in declaration order: attributes of the
/// most derived class first, then those of each ancestor, then names only
/// reachable through an accessor. The order in which explicit names were
/// supplied does not matter, so a plan depends only on its
/// [`PlanKey`](crate::plan::PlanKey).
///
/// Resolution of a name prefers a getter (`getX`, `get_x`, or the `is`
/// forms for booleans) when its result type is
/// [compatible](crate::plan::is_compatible) with the attribute and, in
/// implicit mode, its visibility passes `threshold`. Otherwise the attribute
/// is read directly if its visibility passes. A name that resolves to
/// neither is an error in explicit mode and is left out in implicit mode.
///
/// Output names go through the aliases of `spec`.
pub fn discover(
    class: &'static ClassInfo,
    spec: &ClassReflectSpec,
    threshold: Visibility,
) -> Result<AttributePlan, UnresolvedAttribute> {
    log::debug!("discovering attributes of `{}`", class.type_path());

    let catalog = Catalog::collect(class);
    let explicit = spec.explicit();

    let selection: Vec<&str> = match explicit {
        Some(names) => {
            let unknown = names.iter().find(|name| {
                catalog.attribute(name).is_none() && catalog.accessor(name).is_none()
            });
            if let Some(name) = unknown {
                return Err(UnresolvedAttribute {
                    class: class.type_path(),
                    attribute: name.clone(),
                });
            }
            catalog
                .declaration_order()
                .filter(|declared| names.iter().any(|name| **name == **declared))
                .collect()
        }
        None => catalog
            .attributes
            .iter()
            .filter(|member| member.info.is_serializable())
            .map(|member| member.info.name())
            .collect(),
    };

    let mut entries: Vec<(Arc<str>, Accessor)> = Vec::with_capacity(selection.len());

    for name in selection {
        match resolve(&catalog, name, explicit.is_some(), threshold) {
            Some(accessor) => entries.push((Arc::from(spec.output_name(name)), accessor)),
            None if explicit.is_some() => {
                return Err(UnresolvedAttribute {
                    class: class.type_path(),
                    attribute: name.into(),
                });
            }
            None => log::warn!(
                "attribute `{name}` of `{}` is not visible at {threshold} and is left out",
                class.type_path(),
            ),
        }
    }

    Ok(AttributePlan::from_entries(class, entries))
}

fn resolve(catalog: &Catalog, name: &str, explicit: bool, threshold: Visibility) -> Option<Accessor> {
    let attribute = catalog.attribute(name);

    if let Some(member) = catalog.accessor(name) {
        let method = member.info;
        let compatible = match (method.returns(), attribute) {
            (Some(returns), Some(attribute)) => is_compatible(returns, attribute.info.ty()),
            (Some(_), None) => true,
            (None, _) => false,
        };
        let visible = explicit || method.visibility().passes(threshold);

        if compatible
            && visible
            && let Some(invoker) = method.invoker()
        {
            let kind = AccessorKind::Method(invoker.clone());
            return Some(Accessor::new(method.name(), kind, member.via.clone()));
        }
    }

    let member = attribute?;
    let info = member.info;
    if explicit || info.visibility().passes(threshold) {
        let kind = AccessorKind::Field(info.reader().clone());
        return Some(Accessor::new(info.name(), kind, member.via.clone()));
    }

    None
}

// -----------------------------------------------------------------------------
// Tests
