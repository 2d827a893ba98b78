//! District annotation of generic `patch_N` groups.
//!
//! The map export labels every region group positionally. District `i` of the
//! list owns label `patch_{i + reserved + 1}`; the first `reserved` groups are
//! background layers.
//!
//! ```text
//! <g id="patch_3">                 <g id="besiktas" data-district="Beşiktaş">
//!   <path d="M ..." style=".."/> ──►  <path id="pathBeşiktaş" d="M ..." style=".."/>
//! </g>                             </g>
//! ```

use quick_xml::events::{BytesStart, Event, attributes::Attribute};
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::{DISTRICT_ATTR, SvgError, SvgStream, attr_value, attributes, is_group, is_path, rebuild};
use crate::config::{AnnotateConfig, CollisionPolicy};
use crate::district::{normalize_id, path_id};

#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("districts `{first}` and `{second}` both normalize to id `{id}`")]
    Collision {
        id: String,
        first: String,
        second: String,
    },

    #[error("district `{0}` has no ASCII letters or digits to build an id from")]
    EmptyId(String),

    #[error(transparent)]
    Svg(#[from] SvgError),
}

// ============================================================================
// Types
// ============================================================================

/// One district bound to its target group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Generic label of the target group (`patch_3`).
    pub label: String,
    /// Display name, verbatim.
    pub name: String,
    /// Element id for the group.
    pub id: String,
    /// Element id for the first shape in the group.
    pub path_id: String,
}

/// A district whose normalized id was already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    /// Normalized id both districts share.
    pub id: String,
    /// District that got the id first.
    pub first: String,
    /// District that collided.
    pub second: String,
    /// Id actually used for `second`.
    pub resolved: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Group relabeled; `path_injected` is false when the group held no shape.
    Annotated { path_injected: bool },
    /// No group carries the expected label.
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictReport {
    pub assignment: Assignment,
    pub outcome: Outcome,
}

/// Annotated document plus what happened to every district.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub svg: String,
    /// Number of groups labeled like `patch_N` in the input.
    pub patch_count: usize,
    pub districts: Vec<DistrictReport>,
    pub collisions: Vec<Collision>,
}

impl Annotation {
    pub fn annotated_count(&self) -> usize {
        self.districts
            .iter()
            .filter(|d| matches!(d.outcome, Outcome::Annotated { .. }))
            .count()
    }

    pub fn missing(&self) -> impl Iterator<Item = &Assignment> {
        self.districts
            .iter()
            .filter(|d| d.outcome == Outcome::Missing)
            .map(|d| &d.assignment)
    }
}

// ============================================================================
// Planning
// ============================================================================

/// Bind each district to its group label and resolve its ids.
pub fn plan(
    districts: &[String],
    config: &AnnotateConfig,
) -> Result<(Vec<Assignment>, Vec<Collision>), AnnotateError> {
    let mut owners: FxHashMap<String, usize> = FxHashMap::default();
    let mut assignments = Vec::with_capacity(districts.len());
    let mut collisions = Vec::new();

    for (index, name) in districts.iter().enumerate() {
        let base = normalize_id(name);
        if base.is_empty() {
            return Err(AnnotateError::EmptyId(name.clone()));
        }

        let id = match owners.get(&base) {
            None => base,
            Some(&owner) => {
                let first = districts[owner].clone();
                let resolved = match config.collision {
                    CollisionPolicy::Error => {
                        return Err(AnnotateError::Collision {
                            id: base,
                            first,
                            second: name.clone(),
                        });
                    }
                    CollisionPolicy::Keep => base.clone(),
                    CollisionPolicy::Suffix => (2..)
                        .map(|n| format!("{base}{n}"))
                        .find(|candidate| !owners.contains_key(candidate))
                        .unwrap_or_default(),
                };
                collisions.push(Collision {
                    id: base,
                    first,
                    second: name.clone(),
                    resolved: resolved.clone(),
                });
                resolved
            }
        };

        owners.entry(id.clone()).or_insert(index);
        assignments.push(Assignment {
            label: config.label_for(index),
            name: name.clone(),
            id,
            path_id: path_id(name),
        });
    }

    Ok((assignments, collisions))
}

// ============================================================================
// Rewriting
// ============================================================================

struct Walk<'p> {
    config: &'p AnnotateConfig,
    plan: &'p [Assignment],
    /// Labels not matched yet, mapped to their plan index.
    targets: FxHashMap<&'p str, usize>,
    /// `Some(path_injected)` once the district's group was found.
    found: Vec<Option<bool>>,
    /// District whose group is open and still waits for its first shape.
    pending: Option<usize>,
    patch_count: usize,
}

impl<'p> Walk<'p> {
    fn new(config: &'p AnnotateConfig, plan: &'p [Assignment]) -> Self {
        Self {
            config,
            plan,
            targets: plan
                .iter()
                .enumerate()
                .map(|(index, a)| (a.label.as_str(), index))
                .collect(),
            found: vec![None; plan.len()],
            pending: None,
            patch_count: 0,
        }
    }

    /// Visit a start or empty tag, returning it rewritten when targeted.
    fn visit<'a>(&mut self, elem: BytesStart<'a>, has_children: bool) -> Result<BytesStart<'a>, SvgError> {
        if is_group(&elem) {
            // any group boundary ends the search for the previous group's shape
            self.pending = None;

            let Some(label) = attr_value(&elem, b"id")? else {
                return Ok(elem);
            };
            if self.config.is_label(&label) {
                self.patch_count += 1;
            }
            let Some(index) = self.targets.remove(label.as_str()) else {
                return Ok(elem);
            };

            self.found[index] = Some(false);
            if has_children {
                self.pending = Some(index);
            }
            return relabel_group(&elem, &self.plan[index]);
        }

        if is_path(&elem)
            && let Some(index) = self.pending.take()
        {
            self.found[index] = Some(true);
            return inject_path_id(&elem, &self.plan[index].path_id);
        }

        Ok(elem)
    }

    fn close_group(&mut self) {
        self.pending = None;
    }
}

/// Replace the group's `id` and add `data-district` right after it.
fn relabel_group(elem: &BytesStart<'_>, assignment: &Assignment) -> Result<BytesStart<'static>, SvgError> {
    let mut attrs = Vec::new();
    for attr in attributes(elem)? {
        match attr.key.as_ref() {
            b"id" => {
                attrs.push(Attribute::from(("id", assignment.id.as_str())));
                attrs.push(Attribute::from((
                    "data-district",
                    assignment.name.as_str(),
                )));
            }
            key if key == DISTRICT_ATTR => {}
            _ => attrs.push(attr),
        }
    }
    Ok(rebuild(elem, attrs))
}

/// Give the shape `id`, placed right before its `d` attribute.
fn inject_path_id(elem: &BytesStart<'_>, id: &str) -> Result<BytesStart<'static>, SvgError> {
    let mut attrs = Vec::new();
    let mut placed = false;
    for attr in attributes(elem)? {
        match attr.key.as_ref() {
            b"id" => {}
            b"d" if !placed => {
                attrs.push(Attribute::from(("id", id)));
                attrs.push(attr);
                placed = true;
            }
            _ => attrs.push(attr),
        }
    }
    if !placed {
        attrs.push(Attribute::from(("id", id)));
    }
    Ok(rebuild(elem, attrs))
}

/// Annotate `svg` with ids for `districts`, in list order.
///
/// Districts whose label is missing are reported, not failed. When nothing
/// matches, the input text is returned unchanged.
pub fn annotate(
    svg: &str,
    districts: &[String],
    config: &AnnotateConfig,
) -> Result<Annotation, AnnotateError> {
    let (plan, collisions) = plan(districts, config)?;
    let mut walk = Walk::new(config, &plan);
    let mut stream = SvgStream::new(svg);

    loop {
        match stream.next()? {
            Event::Start(elem) => {
                let elem = walk.visit(elem, true)?;
                stream.write(Event::Start(elem))?;
            }
            Event::Empty(elem) => {
                let elem = walk.visit(elem, false)?;
                stream.write(Event::Empty(elem))?;
            }
            Event::End(elem) => {
                if elem.local_name().as_ref() == b"g" {
                    walk.close_group();
                }
                stream.write(Event::End(elem))?;
            }
            Event::Eof => break,
            event => stream.write(event)?,
        }
    }

    let any_found = walk.found.iter().any(Option::is_some);
    let patch_count = walk.patch_count;
    let found = walk.found;

    let svg = if any_found {
        stream.finish()?
    } else {
        svg.to_string()
    };

    let districts = plan
        .into_iter()
        .zip(found)
        .map(|(assignment, found)| DistrictReport {
            assignment,
            outcome: match found {
                Some(path_injected) => Outcome::Annotated { path_injected },
                None => Outcome::Missing,
            },
        })
        .collect();

    Ok(Annotation {
        svg,
        patch_count,
        districts,
        collisions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::count_districts;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Document with `n` groups `patch_1..=patch_n`, one path each.
    fn map_svg(n: usize) -> String {
        let mut svg = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\">\n");
        for i in 1..=n {
            svg.push_str(&format!(
                " <g id=\"patch_{i}\">\n  <path d=\"M {i} {i} z\" style=\"fill: #ffffff\"/>\n </g>\n"
            ));
        }
        svg.push_str("</svg>\n");
        svg
    }

    #[test]
    fn test_annotate_example() {
        let result = annotate(&map_svg(4), &names(&["Beşiktaş", "Şişli"]), &AnnotateConfig::default())
            .unwrap();

        assert!(result.svg.contains(r#"<g id="besiktas" data-district="Beşiktaş">"#));
        assert!(result.svg.contains(r#"<g id="sisli" data-district="Şişli">"#));
        assert!(result.svg.contains(r#"<path id="pathBeşiktaş" d="M 3 3 z" style="fill: #ffffff"/>"#));
        assert!(result.svg.contains(r#"<path id="pathŞişli" d="M 4 4 z""#));
        // background groups untouched
        assert!(result.svg.contains(r#"<g id="patch_1">"#));
        assert!(result.svg.contains(r#"<g id="patch_2">"#));
        assert!(!result.svg.contains("patch_3"));
        assert_eq!(result.patch_count, 4);
        assert_eq!(result.annotated_count(), 2);
    }

    #[test]
    fn test_annotate_all_groups_once_in_order() {
        let list = names(&["Adalar", "Bakırköy", "Beykoz", "Eyüp Sultan", "Üsküdar"]);
        let result = annotate(&map_svg(list.len() + 2), &list, &AnnotateConfig::default()).unwrap();

        assert_eq!(count_districts(&result.svg).unwrap(), list.len());
        for (i, report) in result.districts.iter().enumerate() {
            assert_eq!(report.assignment.name, list[i]);
            assert_eq!(report.assignment.label, format!("patch_{}", i + 3));
            assert_eq!(report.outcome, Outcome::Annotated { path_injected: true });
            assert!(
                result
                    .svg
                    .contains(&format!(r#"data-district="{}""#, list[i]))
            );
        }
        assert!(result.svg.contains(r#"<g id="eyupsultan" data-district="Eyüp Sultan">"#));
        assert!(result.svg.contains(r#"id="pathEyüpSultan""#));
    }

    #[test]
    fn test_more_districts_than_groups() {
        let list = names(&["Adalar", "Beykoz", "Fatih", "Sarıyer"]);
        let result = annotate(&map_svg(4), &list, &AnnotateConfig::default()).unwrap();

        assert_eq!(result.annotated_count(), 2);
        let missing: Vec<_> = result.missing().map(|a| a.label.as_str()).collect();
        assert_eq!(missing, vec!["patch_5", "patch_6"]);
        assert_eq!(count_districts(&result.svg).unwrap(), 2);
    }

    #[test]
    fn test_nothing_found_returns_input_verbatim() {
        let svg = "<svg>\n  <g   id=\"patch_1\" ></g>\n</svg>";
        let result = annotate(svg, &names(&["Fatih"]), &AnnotateConfig::default()).unwrap();
        assert_eq!(result.svg, svg);
        assert_eq!(result.annotated_count(), 0);
        assert_eq!(result.patch_count, 1);
    }

    #[test]
    fn test_byte_order_mark_kept_on_rewrite() {
        let svg = format!("\u{feff}{}", map_svg(3));
        let result = annotate(&svg, &names(&["Adalar"]), &AnnotateConfig::default()).unwrap();
        assert!(result.svg.starts_with("\u{feff}<svg"));
        assert!(result.svg.contains(r#"<g id="adalar" data-district="Adalar">"#));
    }

    #[test]
    fn test_empty_district_list() {
        let svg = map_svg(3);
        let result = annotate(&svg, &[], &AnnotateConfig::default()).unwrap();
        assert_eq!(result.svg, svg);
        assert!(result.districts.is_empty());
    }

    #[test]
    fn test_path_id_stops_at_group_boundary() {
        let svg = concat!(
            "<svg>",
            "<g id=\"patch_1\"/>",
            "<g id=\"patch_2\"/>",
            "<g id=\"patch_3\"><rect width=\"1\"/></g>",
            "<g id=\"patch_4\"><path d=\"M 0 0\"/></g>",
            "</svg>"
        );
        let result = annotate(svg, &names(&["Fatih"]), &AnnotateConfig::default()).unwrap();

        assert_eq!(
            result.districts[0].outcome,
            Outcome::Annotated { path_injected: false }
        );
        assert!(result.svg.contains(r#"<g id="patch_4"><path d="M 0 0"/></g>"#));
    }

    #[test]
    fn test_only_first_shape_gets_path_id() {
        let svg = concat!(
            "<svg><g id=\"patch_1\"/><g id=\"patch_2\"/>",
            "<g id=\"patch_3\"><path d=\"M 1 1\"/><path d=\"M 2 2\"/></g></svg>"
        );
        let result = annotate(svg, &names(&["Kadıköy"]), &AnnotateConfig::default()).unwrap();
        assert!(result.svg.contains(r#"<path id="pathKadıköy" d="M 1 1"/><path d="M 2 2"/>"#));
    }

    #[test]
    fn test_existing_path_id_replaced() {
        let svg = r#"<svg><g id="patch_3"><path style="x" id="old" d="M 0 0"/></g></svg>"#;
        let result = annotate(svg, &names(&["Fatih"]), &AnnotateConfig::default()).unwrap();
        assert!(result.svg.contains(r#"<path style="x" id="pathFatih" d="M 0 0"/>"#));
    }

    #[test]
    fn test_path_without_d_gets_id_appended() {
        let svg = r#"<svg><g id="patch_3"><path style="x"></path></g></svg>"#;
        let result = annotate(svg, &names(&["Fatih"]), &AnnotateConfig::default()).unwrap();
        assert!(result.svg.contains(r#"<path style="x" id="pathFatih"></path>"#));
    }

    #[test]
    fn test_group_attributes_kept() {
        let svg = r#"<svg><g clip-path="url(#c)" id="patch_3" data-district="old"><path d="M 0 0"/></g></svg>"#;
        let result = annotate(svg, &names(&["Fatih"]), &AnnotateConfig::default()).unwrap();
        assert!(
            result
                .svg
                .contains(r#"<g clip-path="url(#c)" id="fatih" data-district="Fatih">"#)
        );
    }

    #[test]
    fn test_display_name_escaped() {
        let svg = r#"<svg><g id="patch_3"><path d="M 0 0"/></g></svg>"#;
        let result = annotate(svg, &names(&["A & \"B\""]), &AnnotateConfig::default()).unwrap();
        assert!(result.svg.contains(r#"data-district="A &amp; &quot;B&quot;""#));
        assert!(result.svg.contains(r#"<g id="ab""#));
    }

    #[test]
    fn test_first_label_match_consumed() {
        let svg = concat!(
            "<svg><g id=\"patch_3\"><path d=\"M 1 1\"/></g>",
            "<g id=\"patch_3\"><path d=\"M 2 2\"/></g></svg>"
        );
        let result = annotate(svg, &names(&["Fatih"]), &AnnotateConfig::default()).unwrap();
        assert_eq!(count_districts(&result.svg).unwrap(), 1);
        assert!(result.svg.contains(r#"<g id="patch_3"><path d="M 2 2"/></g>"#));
    }

    #[test]
    fn test_custom_reserved_and_prefix() {
        let config = AnnotateConfig {
            patch_prefix: "region-".into(),
            reserved: 0,
            ..AnnotateConfig::default()
        };
        let svg = r#"<svg><g id="region-1"><path d="M 0 0"/></g></svg>"#;
        let result = annotate(svg, &names(&["Esenler"]), &config).unwrap();
        assert!(result.svg.contains(r#"<g id="esenler" data-district="Esenler">"#));
    }

    #[test]
    fn test_collision_suffix() {
        let list = names(&["Şile", "Sile", "SILE"]);
        let (plan, collisions) = plan(&list, &AnnotateConfig::default()).unwrap();
        let ids: Vec<_> = plan.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["sile", "sile2", "sile3"]);
        assert_eq!(collisions.len(), 2);
        assert_eq!(collisions[0].first, "Şile");
        assert_eq!(collisions[1].resolved, "sile3");
    }

    #[test]
    fn test_collision_keep() {
        let config = AnnotateConfig {
            collision: CollisionPolicy::Keep,
            ..AnnotateConfig::default()
        };
        let (plan, collisions) = plan(&names(&["Şile", "Sile"]), &config).unwrap();
        assert_eq!(plan[0].id, plan[1].id);
        assert_eq!(collisions.len(), 1);
    }

    #[test]
    fn test_collision_error() {
        let config = AnnotateConfig {
            collision: CollisionPolicy::Error,
            ..AnnotateConfig::default()
        };
        let err = annotate(&map_svg(4), &names(&["Şile", "Sile"]), &config).unwrap_err();
        assert!(matches!(err, AnnotateError::Collision { ref id, .. } if id == "sile"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let err = plan(&names(&["Fatih", "(*)"]), &AnnotateConfig::default()).unwrap_err();
        assert!(matches!(err, AnnotateError::EmptyId(ref name) if name == "(*)"));
    }

    #[test]
    fn test_malformed_svg_fails() {
        let err = annotate("<svg><g id=\"patch_3\"></svg>", &names(&["Fatih"]), &AnnotateConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnnotateError::Svg(SvgError::Parse { .. })));
    }
}
