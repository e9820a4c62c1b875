//! Display of declared types in diagnostics.

use crate::hierarchy::NominalHierarchy;
use crate::intern::TypeInterner;
use crate::types::{TypeData, TypeId};

pub struct TypeFormatter<'a> {
    interner: &'a TypeInterner,
    hierarchy: &'a dyn NominalHierarchy,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(interner: &'a TypeInterner, hierarchy: &'a dyn NominalHierarchy) -> Self {
        Self {
            interner,
            hierarchy,
        }
    }

    pub fn format(&self, ty: TypeId) -> String {
        let Some(data) = self.interner.lookup(ty) else {
            return format!("<invalid {}>", ty.0);
        };
        match data {
            TypeData::Intrinsic(kind) => kind.name().to_string(),
            TypeData::Union(members) => {
                let parts: Vec<String> = members.iter().map(|&m| self.format(m)).collect();
                format!("({})", parts.join("|"))
            }
            TypeData::Object(props) => {
                let parts: Vec<String> = props
                    .iter()
                    .map(|(name, t)| format!("{name}: {}", self.format(*t)))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            TypeData::Nominal(nominal) => {
                let name = self.hierarchy.nominal_name(nominal.id);
                if nominal.type_args.is_empty() {
                    name
                } else {
                    let args: Vec<String> =
                        nominal.type_args.iter().map(|&a| self.format(a)).collect();
                    format!("{name}<{}>", args.join(","))
                }
            }
            TypeData::Function(shape) => {
                let mut params: Vec<String> = shape.params.iter().map(|&p| self.format(p)).collect();
                if let Some(rest) = shape.rest {
                    params.push(format!("...{}", self.format(rest)));
                }
                let prefix = match shape.constructs {
                    Some(id) => format!("new:{}", self.hierarchy.nominal_name(id)),
                    None => String::new(),
                };
                if !prefix.is_empty() {
                    params.insert(0, prefix);
                }
                format!("function({}): {}", params.join(", "), self.format(shape.returns))
            }
            TypeData::TypeVar(name) => name,
            TypeData::EnumElement(id) => self.hierarchy.enum_name(id),
        }
    }
}
