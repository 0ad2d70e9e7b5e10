use std::fmt;

use serde_json::{Map, Number, Value};

use crate::validation::{type_name, Checker, FieldPath, ValidationFailure};

/// Validated `{results: [Person, ...]}` payload. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomUserResponse {
    pub results: Vec<Person>,
}

impl RandomUserResponse {
    /// Upstream returns a single result by default; any extras are ignored.
    pub fn into_first(self) -> Option<Person> {
        self.results.into_iter().next()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: PersonName,
    pub location: Location,
    pub login: Login,
    pub registered: Registered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub country: String,
    pub city: String,
    pub postcode: Postcode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Login {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registered {
    /// ISO-8601 timestamp as sent by upstream; parsed only when shaping.
    pub date: String,
}

/// Upstream sends postcodes as strings for some countries and numbers for others.
#[derive(Debug, Clone, PartialEq)]
pub enum Postcode {
    Text(String),
    Number(Number),
}

impl fmt::Display for Postcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Postcode::Text(s) => f.write_str(s),
            // Integral floats print without a trailing ".0".
            Postcode::Number(n) => match n.as_f64() {
                Some(v) if n.is_f64() && v.fract() == 0.0 => write!(f, "{v:.0}"),
                _ => write!(f, "{n}"),
            },
        }
    }
}

/// Validates a raw upstream payload. Every record in `results` is checked so
/// the error list names each violated field, e.g. `results.0.location.postcode`.
pub fn validate_random_user_response(raw: &Value) -> Result<RandomUserResponse, ValidationFailure> {
    let mut checker = Checker::new();
    let root = FieldPath::root();

    let Some(map) = checker.object(Some(raw), &root) else {
        return checker.finish(None);
    };

    let results_path = root.key("results");
    let Some(items) = checker.array(map.get("results"), &results_path) else {
        return checker.finish(None);
    };

    if items.is_empty() {
        checker.fail(&results_path, "Array must contain at least 1 element(s)");
        return checker.finish(None);
    }

    let mut results = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if let Some(person) = check_person(&mut checker, item, &results_path.key(i)) {
            results.push(person);
        }
    }

    let response = (results.len() == items.len()).then_some(RandomUserResponse { results });
    checker.finish(response)
}

fn check_person(checker: &mut Checker, value: &Value, path: &FieldPath) -> Option<Person> {
    let map = checker.object(Some(value), path)?;

    let name = nested(checker, map, "name", path, |c, m, p| {
        let first = c.string_field(m, "first", p);
        let last = c.string_field(m, "last", p);
        Some(PersonName {
            first: first?,
            last: last?,
        })
    });

    let location = nested(checker, map, "location", path, |c, m, p| {
        let country = c.string_field(m, "country", p);
        let city = c.string_field(m, "city", p);
        let postcode = check_postcode(c, m.get("postcode"), &p.key("postcode"));
        Some(Location {
            country: country?,
            city: city?,
            postcode: postcode?,
        })
    });

    let login = nested(checker, map, "login", path, |c, m, p| {
        Some(Login {
            username: c.string_field(m, "username", p)?,
        })
    });

    let registered = nested(checker, map, "registered", path, |c, m, p| {
        Some(Registered {
            date: c.string_field(m, "date", p)?,
        })
    });

    Some(Person {
        name: name?,
        location: location?,
        login: login?,
        registered: registered?,
    })
}

/// Requires `parent[key]` to be an object and hands it to `inner`.
fn nested<T>(
    checker: &mut Checker,
    parent: &Map<String, Value>,
    key: &str,
    path: &FieldPath,
    inner: impl FnOnce(&mut Checker, &Map<String, Value>, &FieldPath) -> Option<T>,
) -> Option<T> {
    let path = path.key(key);
    let map = checker.object(parent.get(key), &path)?;
    inner(checker, map, &path)
}

fn check_postcode(checker: &mut Checker, value: Option<&Value>, path: &FieldPath) -> Option<Postcode> {
    match value {
        Some(Value::String(s)) => Some(Postcode::Text(s.clone())),
        Some(Value::Number(n)) => Some(Postcode::Number(n.clone())),
        None => {
            checker.fail(path, "Required");
            None
        }
        Some(other) => {
            checker.fail(
                path,
                format!("Expected string | number, received {}", type_name(Some(other))),
            );
            None
        }
    }
}
