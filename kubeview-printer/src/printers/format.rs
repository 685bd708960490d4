use serde::Serialize;

use crate::component::{Code, Component, Link};
use crate::error::PrintError;

/// One value prints as plain text; none or several print as a YAML block.
pub fn print_string_list(values: &[String]) -> Result<Component, PrintError> {
    if let [single] = values {
        return Ok(Component::text(single.clone()));
    }
    let yaml = serde_yaml::to_string(values)?;
    Ok(Component::markdown(format!("```yaml\n{yaml}```")))
}

pub fn print_optional_list(values: Option<&Vec<String>>) -> Result<Component, PrintError> {
    print_string_list(values.map(Vec::as_slice).unwrap_or_default())
}

/// A single link, a markdown list of links, or `<none>`.
pub fn link_list(mut links: Vec<Link>) -> Component {
    match links.len() {
        0 => Component::text("<none>"),
        1 => links.remove(0).into(),
        _ => Component::markdown(
            links
                .iter()
                .map(|l| format!("[{}]({})", l.text, l.reference))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}

/// YAML dump of any serializable value.
pub fn yaml_code<T: Serialize>(value: &T) -> Result<Component, PrintError> {
    Ok(Code::new(serde_yaml::to_string(value)?).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_single_value_is_plain_text() {
        let c = print_string_list(&["apps".to_string()]).unwrap();
        assert_eq!(c, Component::text("apps"));
    }

    #[test]
    fn test_multiple_values_are_yaml() {
        let c = print_string_list(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(c, Component::markdown("```yaml\n- a\n- b\n```"));
    }

    #[test]
    fn test_no_values_are_yaml() {
        let c = print_optional_list(None).unwrap();
        assert_eq!(c, Component::markdown("```yaml\n[]\n```"));
    }

    #[test]
    fn test_link_list() {
        assert_eq!(link_list(vec![]), Component::text("<none>"));

        let one = Link::new("a", "/a");
        assert_eq!(link_list(vec![one.clone()]), one.into());

        let two = link_list(vec![Link::new("a", "/a"), Link::new("b", "/b")]);
        assert_eq!(two, Component::markdown("[a](/a), [b](/b)"));
    }

    #[test]
    fn test_yaml_code() {
        let value = BTreeMap::from([("a", 1)]);
        assert_eq!(yaml_code(&value).unwrap(), Code::new("a: 1\n").into());
    }
}
