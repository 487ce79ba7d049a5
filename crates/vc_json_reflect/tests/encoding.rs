use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, SystemTime};

use vc_json_reflect::encode::Encoder;
use vc_json_reflect::guard::TraversalGuard;
use vc_json_reflect::info::{Class, Visibility};
use vc_json_reflect::plan::{PlanCache, PlanKey};
use vc_json_reflect::policy::{ClassReflectSpec, DateFormat, EncodingPolicy, NumberFormat, PolicyDefaults};
use vc_json_reflect::serde::EmitDriver;
use vc_json_reflect::{MapError, Node, Number, Reflect, impl_class};

// -----------------------------------------------------------------------------
// Classes

struct Account {
    id: u64,
    owner: String,
    balance: i64,
    pin: u16,
    opened: SystemTime,
}

impl Account {
    fn sample() -> Self {
        Self {
            id: 7,
            owner: "Ada".to_owned(),
            balance: -20,
            pin: 1234,
            opened: SystemTime::UNIX_EPOCH + Duration::from_secs(2),
        }
    }
}

impl_class!(Account, |class| class
    .field::<u64>("id", Visibility::Public, |a| &a.id)
    .field::<String>("owner", Visibility::Protected, |a| &a.owner)
    .field::<i64>("balance", Visibility::Private, |a| &a.balance)
    .field::<u16>("pin", Visibility::Private, |a| &a.pin)
    .field::<SystemTime>("opened", Visibility::Public, |a| &a.opened)
    .getter::<String>("getOwner", Visibility::Public, |a| Ok(a.owner.to_uppercase())));

struct Ledger {
    title: String,
    accounts: Vec<Arc<Account>>,
    notes: BTreeMap<String, String>,
}

impl_class!(Ledger, |class| class
    .field::<String>("title", Visibility::Public, |l| &l.title)
    .field::<Vec<Arc<Account>>>("accounts", Visibility::Public, |l| &l.accounts)
    .field::<BTreeMap<String, String>>("notes", Visibility::Public, |l| &l.notes));

struct TreeNode {
    label: String,
    parent: OnceLock<Arc<TreeNode>>,
}

impl_class!(TreeNode, |class| class
    .type_path("tests::TreeNode")
    .field::<String>("label", Visibility::Public, |n| &n.label)
    .field::<OnceLock<Arc<TreeNode>>>("parent", Visibility::Public, |n| &n.parent));

struct Registered {
    a: u8,
    b: u8,
}

impl_class!(Registered, |class| class
    .field::<u8>("a", Visibility::Public, |r| &r.a)
    .field::<u8>("b", Visibility::Public, |r| &r.b));

#[cfg(feature = "auto_register")]
vc_json_reflect::submit_default_spec!(|| ClassReflectSpec::of::<Registered>()
    .with_explicit(["b"])
    .with_alias("b", "bee"));

// -----------------------------------------------------------------------------
// Helpers

fn names(node: &Node) -> Vec<&str> {
    node.as_object().unwrap().iter().map(|(name, _)| name).collect()
}

fn field<'a>(node: &'a Node, name: &str) -> &'a Node {
    node.as_object()
        .unwrap()
        .iter()
        .find_map(|(key, value)| (key == name).then_some(value))
        .unwrap()
}

fn json(value: &dyn Reflect, policy: &EncodingPolicy) -> String {
    let cache = PlanCache::new();
    let node = Encoder::with_cache(policy, &cache).encode(value).unwrap();
    serde_json::to_string(&EmitDriver::new(&node, policy)).unwrap()
}

// -----------------------------------------------------------------------------
// Plans and cache

fn aliased_pair(order: [&'static str; 2]) -> ClassReflectSpec {
    ClassReflectSpec::of::<Account>()
        .with_explicit(order)
        .with_alias("id", "key")
        .with_alias("owner", "who")
}

#[test]
fn explicit_order_does_not_depend_on_which_spec_came_first() {
    let reordered = aliased_pair(["owner", "id"]);
    let declared = aliased_pair(["id", "owner"]);

    let threshold = Visibility::Public;
    let class = Account::class_info();
    assert_eq!(
        PlanKey::new(class.id(), &reordered, threshold),
        PlanKey::new(class.id(), &declared, threshold),
    );

    let cache = PlanCache::new();
    let account = Account::sample();

    let policy = EncodingPolicy::new().with_class_spec(reordered);
    let node = Encoder::with_cache(&policy, &cache).encode(&account).unwrap();
    assert_eq!(names(&node), ["key", "who"]);

    let policy = EncodingPolicy::new().with_class_spec(declared);
    let node = Encoder::with_cache(&policy, &cache).encode(&account).unwrap();
    assert_eq!(names(&node), ["key", "who"]);

    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.plans), (1, 1, 1));
}

#[test]
fn caching_does_not_change_explicit_output() {
    let cache = PlanCache::new();
    let account = Account::sample();

    let warm = EncodingPolicy::new().with_class_spec(aliased_pair(["id", "owner"]));
    Encoder::with_cache(&warm, &cache).encode(&account).unwrap();

    let cached = EncodingPolicy::new().with_class_spec(aliased_pair(["owner", "id"]));
    let uncached = cached.clone().with_cache_plans(false);

    let through_cache = Encoder::with_cache(&cached, &cache).encode(&account).unwrap();
    let fresh = Encoder::with_cache(&uncached, &PlanCache::new()).encode(&account).unwrap();

    assert_eq!(names(&through_cache), names(&fresh));
    assert_eq!(names(&fresh), ["key", "who"]);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn different_thresholds_get_different_plans() {
    let cache = PlanCache::new();
    let account = Account::sample();

    let public = EncodingPolicy::new();
    let node = Encoder::with_cache(&public, &cache).encode(&account).unwrap();
    assert_eq!(names(&node), ["id", "owner", "opened"]);

    let private = EncodingPolicy::new().with_privacy_threshold(Visibility::Private);
    let node = Encoder::with_cache(&private, &cache).encode(&account).unwrap();
    assert_eq!(names(&node), ["id", "owner", "balance", "pin", "opened"]);

    assert_eq!(cache.len(), 2);
}

#[test]
fn cached_plan_is_not_affected_by_later_spec_changes() {
    let cache = PlanCache::new();
    let account = Account::sample();

    let mut policy = EncodingPolicy::new();
    let before = Encoder::with_cache(&policy, &cache).encode(&account).unwrap();

    policy.class_spec_or_insert::<Account>().insert_alias("id", "number");
    let after = Encoder::with_cache(&policy, &cache).encode(&account).unwrap();

    assert_eq!(names(&before), ["id", "owner", "opened"]);
    assert_eq!(names(&after), ["number", "owner", "opened"]);
    assert_eq!(cache.len(), 2);
}

// -----------------------------------------------------------------------------
// Resolution

#[test]
fn public_getter_exposes_protected_field() {
    let node = {
        let policy = EncodingPolicy::new();
        let cache = PlanCache::new();
        Encoder::with_cache(&policy, &cache).encode(&Account::sample()).unwrap()
    };
    assert_eq!(field(&node, "owner").as_text(), Some("ADA"));
}

#[test]
fn explicit_names_must_resolve() {
    let policy = EncodingPolicy::new()
        .with_class_spec(ClassReflectSpec::of::<Account>().with_explicit(["pin", "iban"]));
    let cache = PlanCache::new();

    let err = Encoder::with_cache(&policy, &cache)
        .encode(&Account::sample())
        .unwrap_err();
    assert!(matches!(
        err,
        MapError::UnresolvedExplicitAttribute { ref attribute, .. } if &**attribute == "iban"
    ));
}

#[test]
fn explicit_names_ignore_privacy() {
    let policy = EncodingPolicy::new()
        .with_class_spec(ClassReflectSpec::of::<Account>().with_explicit(["pin", "id"]));
    assert_eq!(json(&Account::sample(), &policy), r#"{"id":7,"pin":1234}"#);
}

// -----------------------------------------------------------------------------
// Traversal

#[test]
fn nested_containers_are_mapped() {
    let shared = Arc::new(Account::sample());
    let ledger = Ledger {
        title: "q1".to_owned(),
        accounts: vec![shared.clone(), shared],
        notes: BTreeMap::from([("audit".to_owned(), "ok".to_owned())]),
    };

    let policy = EncodingPolicy::new();
    assert_eq!(
        json(&ledger, &policy),
        concat!(
            r#"{"title":"q1","accounts":["#,
            r#"{"id":7,"owner":"ADA","opened":2000},"#,
            r#"{"id":7,"owner":"ADA","opened":2000}"#,
            r#"],"notes":{"audit":"ok"}}"#,
        ),
    );
}

#[test]
fn cycles_fail_and_unwind_the_guard() {
    let root = Arc::new(TreeNode {
        label: "root".to_owned(),
        parent: OnceLock::new(),
    });
    let child = Arc::new(TreeNode {
        label: "child".to_owned(),
        parent: OnceLock::new(),
    });
    let _ = child.parent.set(root.clone());
    let _ = root.parent.set(child.clone());

    let policy = EncodingPolicy::new();
    let cache = PlanCache::new();
    let encoder = Encoder::with_cache(&policy, &cache);
    let mut guard = TraversalGuard::new();

    let err = encoder.encode_with_guard(&child, &mut guard).unwrap_err();
    assert!(matches!(
        err,
        MapError::CycleDetected { type_path: "tests::TreeNode", .. }
    ));
    assert!(guard.is_empty());

    let leaf = TreeNode {
        label: "leaf".to_owned(),
        parent: OnceLock::new(),
    };
    let node = encoder.encode_with_guard(&leaf, &mut guard).unwrap();
    assert!(field(&node, "parent").is_null());
}

// -----------------------------------------------------------------------------
// Policy

#[test]
fn snapshots_do_not_leak_into_each_other() {
    let defaults = PolicyDefaults::builtin();
    let mut left = EncodingPolicy::derive(&defaults);
    let right = EncodingPolicy::derive(&defaults);

    left.set_privacy_threshold(Visibility::Private);
    left.class_spec_or_insert::<Account>().set_explicit(["id"]);

    assert_eq!(right.privacy_threshold(), Visibility::Public);
    assert!(right.class_spec_of::<Account>().is_none());
    assert!(defaults.policy().class_spec_of::<Account>().is_none());
}

#[cfg(feature = "auto_register")]
#[test]
fn submitted_specs_are_loaded_as_defaults() {
    let defaults = PolicyDefaults::load();
    let policy = EncodingPolicy::derive(&defaults);

    assert!(policy.class_spec_of::<Registered>().is_some());
    assert_eq!(json(&Registered { a: 1, b: 2 }, &policy), r#"{"bee":2}"#);
    assert_eq!(
        json(&Registered { a: 1, b: 2 }, &EncodingPolicy::new()),
        r#"{"a":1,"b":2}"#,
    );
}

// -----------------------------------------------------------------------------
// Emission

#[derive(Debug)]
struct Padded;

impl NumberFormat for Padded {
    fn format(&self, number: Number) -> String {
        format!("{number:0>4}")
    }

    fn box_clone(&self) -> Box<dyn NumberFormat> {
        Box::new(Padded)
    }
}

#[derive(Debug)]
struct Iso;

impl DateFormat for Iso {
    fn format(&self, time: SystemTime) -> String {
        let secs = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        format!("1970-01-01T00:00:{secs:02}Z")
    }

    fn box_clone(&self) -> Box<dyn DateFormat> {
        Box::new(Iso)
    }
}

#[test]
fn formatters_shape_emitted_scalars() {
    let policy = EncodingPolicy::new()
        .with_privacy_threshold(Visibility::Private)
        .with_class_spec(
            ClassReflectSpec::of::<Account>().with_explicit(["id", "balance", "opened"]),
        )
        .with_number_format(Padded)
        .with_date_format(Iso);

    assert_eq!(
        json(&Account::sample(), &policy),
        r#"{"id":"0007","balance":"0-20","opened":"1970-01-01T00:00:02Z"}"#,
    );
}

#[test]
fn unreflected_classes_emit_their_name() {
    let policy = EncodingPolicy::new().with_reflect_unknown_types(false);
    assert_eq!(json(&Account::sample(), &policy), r#""Account""#);
    assert_eq!(json(&vec![1_u8], &policy), "[1]");
}
