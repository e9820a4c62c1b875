//! The inheritance finalizer.
//!
//! A class or interface is finalized once all of its supertypes are. Its
//! inherited properties are checked against its own declarations, method
//! signatures pick up what the overridden methods declare, and the merged
//! property set is frozen.

use crate::error::{GtiError, GtiResult};
use crate::nominal::NominalProperty;
use crate::property_def::PropertyDef;
use crate::state::{FinalizeStats, GlobalTypeInfoBuilder};
use gti_ast::{JsDoc, NodeIndex};
use gti_common::diagnostics::diagnostic_codes;
use gti_common::limits::MAX_SUBTYPE_DEPTH;
use gti_solver::{
    DeclaredFunctionType, NominalHierarchy, NominalId, NominalRef, SubtypeChecker, TypeId,
    instantiate_ref, instantiate_type, meet_all, substitution_for,
};
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

struct PendingReport {
    site: NodeIndex,
    code: u32,
    args: Vec<String>,
}

/// What the supertypes of one nominal type contribute.
#[derive(Default)]
struct Inheritance {
    /// Candidate types per property; the final type is their meet.
    props: IndexMap<String, Vec<TypeId>>,
    /// Overridden signatures per method declared on the type itself.
    methods: IndexMap<String, Vec<DeclaredFunctionType>>,
    /// Flags of the first supertype property seen, per name.
    flags: IndexMap<String, NominalProperty>,
    reports: Vec<PendingReport>,
}

impl GlobalTypeInfoBuilder<'_> {
    /// Finalize every class and interface, supertypes first.
    ///
    /// Types whose supertypes are not finalized yet go to the back of the
    /// queue; exceeding `max_worklist_iterations` re-queues is fatal.
    /// Already finalized types are skipped, so running this twice is a
    /// no-op.
    pub fn finalize_nominal_types(&mut self) -> GtiResult<FinalizeStats> {
        let ceiling = self.options.max_worklist_iterations;
        let mut worklist: VecDeque<NominalId> = self
            .table
            .nominal_ids()
            .filter(|&id| !self.table.nominal(id).is_finalized())
            .collect();
        debug!(pending = worklist.len(), "finalizing nominal types");
        let mut stats = FinalizeStats::default();
        while let Some(id) = worklist.pop_front() {
            if !self.supertypes_finalized(id) {
                if stats.requeues >= ceiling {
                    worklist.push_front(id);
                    let pending = worklist.iter().map(|&n| self.table.nominal_name(n)).collect();
                    return Err(GtiError::WorklistCeilingExceeded { ceiling, pending });
                }
                trace!(name = %self.table.nominal_name(id), "supertypes not ready");
                stats.requeues += 1;
                worklist.push_back(id);
                continue;
            }
            self.finalize_one(id)?;
            stats.finalized += 1;
        }
        self.finalize_stats.finalized += stats.finalized;
        self.finalize_stats.requeues += stats.requeues;
        debug!(finalized = stats.finalized, requeues = stats.requeues, "nominal types finalized");
        Ok(stats)
    }

    fn supertypes_finalized(&self, id: NominalId) -> bool {
        self.table
            .nominal(id)
            .header()
            .direct_supertypes()
            .iter()
            .all(|sup| self.table.nominal(sup.id).is_finalized())
    }

    fn finalize_one(&mut self, id: NominalId) -> GtiResult<()> {
        let header = self.table.nominal(id).header().clone();
        let class_name = header.name.to_string();
        let mut non_inherited: IndexSet<String> = self
            .table
            .nominal(id)
            .properties()
            .map(|(name, _)| name.to_string())
            .collect();

        let mut inheritance = Inheritance::default();
        for sup in header.direct_supertypes() {
            let names: Vec<String> = self
                .table
                .nominal(sup.id)
                .properties()
                .map(|(name, _)| name.to_string())
                .collect();
            for pname in names {
                non_inherited.shift_remove(&pname);
                self.check_super_property(id, &sup, &pname, &mut inheritance);
            }
        }

        let Inheritance {
            mut props,
            methods,
            flags,
            mut reports,
        } = inheritance;
        let mut resolved = IndexMap::new();
        {
            let checker = SubtypeChecker::new(&self.interner, &self.table);
            for (pname, mut signatures) in methods {
                let Some(def) = self.property_defs.get_mut(id, &pname) else {
                    continue;
                };
                let Some(local) = def.method_type.clone() else {
                    continue;
                };
                dedup_signatures(&mut signatures);
                let Some(inherited) = DeclaredFunctionType::meet(&checker, &signatures) else {
                    reports.push(PendingReport {
                        site: def.def_site,
                        code: diagnostic_codes::INCOMPATIBLE_EXTENDED_PROPERTY_TYPE,
                        args: vec![class_name.clone(), pname],
                    });
                    continue;
                };
                let updated = local.with_type_info_from_super(&inherited);
                let fn_type = updated.to_function_type(&self.interner);
                if let Some(method_scope) = def.method_scope {
                    self.scopes.get_mut(method_scope).declared_type = Some(updated.clone());
                }
                def.method_type = Some(updated);
                props.entry(pname).or_default().push(fn_type);
            }

            for (pname, candidates) in props {
                match meet_all(&checker, &candidates) {
                    Some(ty) => {
                        let base = flags.get(&pname).copied().unwrap_or(NominalProperty {
                            declared_type: None,
                            is_const: false,
                            on_prototype: true,
                            inherited: true,
                        });
                        resolved.insert(
                            pname,
                            NominalProperty {
                                declared_type: Some(ty),
                                ..base
                            },
                        );
                    }
                    None => reports.push(PendingReport {
                        site: header.def_site,
                        code: diagnostic_codes::INCOMPATIBLE_EXTENDED_PROPERTY_TYPE,
                        args: vec![class_name.clone(), pname],
                    }),
                }
            }
        }

        let arena = self.arena;
        for pname in &non_inherited {
            let Some(def) = self.property_defs.get(id, pname) else {
                continue;
            };
            if arena.best_jsdoc(def.def_site).is_some_and(JsDoc::is_override) {
                reports.push(PendingReport {
                    site: def.def_site,
                    code: diagnostic_codes::UNKNOWN_OVERRIDE,
                    args: vec![pname.clone(), class_name.clone()],
                });
            }
        }

        for report in reports {
            let args: Vec<&str> = report.args.iter().map(String::as_str).collect();
            self.report(report.site, report.code, &args);
        }
        trace!(name = %class_name, inherited = resolved.len(), "finalized");
        self.table.nominal_mut(id).finalize(resolved);
        Ok(())
    }

    /// Check one property `pname` that `current` inherits from `sup`.
    fn check_super_property(
        &self,
        current: NominalId,
        sup: &NominalRef,
        pname: &str,
        inheritance: &mut Inheritance,
    ) {
        let sup_state = self.table.nominal(sup.id);
        let Some(sup_prop) = sup_state.property(pname).copied() else {
            return;
        };
        let subst = substitution_for(&sup_state.header().type_parameters, &sup.type_args);
        let Some(inherited_ty) = sup_prop
            .declared_type
            .map(|t| instantiate_type(&self.interner, t, &subst))
        else {
            return;
        };
        inheritance
            .flags
            .entry(pname.to_string())
            .or_insert(sup_prop);

        let sup_is_interface = sup_state.header().is_interface();
        let inherited_defs = if sup_is_interface {
            self.prop_defs_from_interface(sup, pname, 0)
        } else {
            self.prop_def_from_class(sup, pname).into_iter().collect()
        };

        let current_header = self.table.nominal(current).header();
        if sup_is_interface && !current_header.is_interface() && !self.class_may_have_property(current, pname) {
            let site = inherited_defs
                .first()
                .map_or(sup_state.header().def_site, |d| d.def_site);
            inheritance.reports.push(PendingReport {
                site,
                code: diagnostic_codes::INTERFACE_METHOD_NOT_IMPLEMENTED,
                args: vec![
                    pname.to_string(),
                    sup_state.header().name.to_string(),
                    current_header.name.to_string(),
                ],
            });
            return;
        }

        let local_def = self.property_defs.get(current, pname);
        let local_ty = local_def.and_then(|_| {
            self.table
                .nominal(current)
                .property(pname)
                .and_then(|p| p.declared_type)
        });
        if let (Some(def), Some(local_ty)) = (local_def, local_ty) {
            let is_method = self.interner.function_shape(local_ty).is_some();
            if !sup_is_interface && is_method && sup_prop.is_const {
                inheritance.reports.push(PendingReport {
                    site: def.def_site,
                    code: diagnostic_codes::CANNOT_OVERRIDE_FINAL_METHOD,
                    args: vec![pname.to_string()],
                });
                return;
            }
        }

        let checker = SubtypeChecker::new(&self.interner, &self.table);
        match (local_def, local_ty) {
            (Some(def), Some(local_ty)) if !checker.is_subtype(local_ty, inherited_ty) => {
                inheritance.reports.push(PendingReport {
                    site: def.def_site,
                    code: diagnostic_codes::INVALID_PROP_OVERRIDE,
                    args: vec![
                        pname.to_string(),
                        self.type_string(inherited_ty),
                        self.type_string(local_ty),
                    ],
                });
            }
            (_, None) => {
                inheritance
                    .props
                    .entry(pname.to_string())
                    .or_default()
                    .push(inherited_ty);
            }
            (Some(def), Some(_)) if def.is_method() => {
                let signatures = inheritance.methods.entry(pname.to_string()).or_default();
                signatures.extend(inherited_defs.into_iter().filter_map(|d| d.method_type));
            }
            _ => {}
        }
    }

    /// Definitions of `pname` on an interface, or on the interfaces it
    /// extends when it only inherits the property.
    fn prop_defs_from_interface(&self, iface: &NominalRef, pname: &str, depth: u32) -> Vec<PropertyDef> {
        let state = self.table.nominal(iface.id);
        if state.property(pname).is_none() || depth >= MAX_SUBTYPE_DEPTH {
            return Vec::new();
        }
        if let Some(def) = self.property_defs.get(iface.id, pname) {
            return vec![self.instantiate_def(def, iface)];
        }
        let subst = substitution_for(&state.header().type_parameters, &iface.type_args);
        state
            .header()
            .interfaces
            .iter()
            .flat_map(|ext| {
                let ext = instantiate_ref(&self.interner, ext, &subst);
                self.prop_defs_from_interface(&ext, pname, depth + 1)
            })
            .collect()
    }

    /// The nearest definition of `pname` along the super-class chain
    /// starting at `class`.
    fn prop_def_from_class(&self, class: &NominalRef, pname: &str) -> Option<PropertyDef> {
        let mut current = class.clone();
        for _ in 0..MAX_SUBTYPE_DEPTH {
            let state = self.table.nominal(current.id);
            state.property(pname)?.declared_type?;
            if let Some(def) = self.property_defs.get(current.id, pname) {
                return Some(self.instantiate_def(def, &current));
            }
            let subst = substitution_for(&state.header().type_parameters, &current.type_args);
            let next = state.header().super_class.as_ref()?;
            current = instantiate_ref(&self.interner, next, &subst);
        }
        None
    }

    /// `def` as seen through `owner`'s type arguments.
    fn instantiate_def(&self, def: &PropertyDef, owner: &NominalRef) -> PropertyDef {
        let params = &self.table.nominal(owner.id).header().type_parameters;
        let subst = substitution_for(params, &owner.type_args);
        PropertyDef {
            def_site: def.def_site,
            method_type: def
                .method_type
                .as_ref()
                .map(|m| m.substitute(&self.interner, &subst)),
            method_scope: def.method_scope,
        }
    }

    /// Whether a class declares `pname` itself or inherits it from its
    /// (finalized) super class.
    fn class_may_have_property(&self, class: NominalId, pname: &str) -> bool {
        let state = self.table.nominal(class);
        state.property(pname).is_some()
            || state
                .header()
                .super_class
                .as_ref()
                .is_some_and(|sup| self.table.nominal(sup.id).property(pname).is_some())
    }
}

/// Signatures are compared structurally; the candidate set has no order.
fn dedup_signatures(signatures: &mut Vec<DeclaredFunctionType>) {
    let mut unique: Vec<DeclaredFunctionType> = Vec::with_capacity(signatures.len());
    for sig in signatures.drain(..) {
        if !unique.contains(&sig) {
            unique.push(sig);
        }
    }
    *signatures = unique;
}
