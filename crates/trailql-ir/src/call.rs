//! Bound function calls.
//!
//! Function resolution happens once, at bind time. The call node carries
//! every fact the backend needs so the function is never re-resolved:
//! shortname, SQL override, typemods, variadic binding state, and the
//! aggregate/window metadata.

use serde::{Deserialize, Serialize};
use trailql_core::TypeHandle;

use crate::arena::{IrArena, NodeId};
use crate::node::Node;
use crate::{IrError, Result};

/// Pass-by modifier of a parameter or return value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeModifier {
    /// Exactly one value.
    Singleton,
    /// An optional value.
    Optional,
    /// A whole set.
    SetOf,
}

/// Duplicate handling requested for an aggregate's input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SetModifier {
    All,
    Distinct,
}

/// A call to a bound function.
#[derive(Debug, Clone)]
pub struct FunctionCallNode {
    /// Short name of the bound function (`std::count`).
    pub func_shortname: String,
    /// The bound function has polymorphic parameters and a polymorphic
    /// return type.
    pub func_polymorphic: bool,
    /// Native SQL function to call instead of a compiled body.
    pub func_sql_function: Option<String>,
    /// Seed for aggregate calls over an empty input. Required for
    /// aggregates to have defined behavior on empty sets.
    pub func_initial_value: Option<NodeId>,
    /// Bound arguments.
    pub args: Vec<NodeId>,
    /// Typemods of parameters, positionally aligned with `args`
    /// (`args.iter().zip(&params_typemods)` is valid).
    pub params_typemods: Vec<TypeModifier>,
    /// The bound function has a variadic parameter with no arguments
    /// bound to it. Distinct from having no variadic parameter at all.
    pub has_empty_variadic: bool,
    /// Type of the variadic parameter, if the function has one.
    pub variadic_param_type: Option<TypeHandle>,
    /// Return type. Concrete in queries; polymorphic only inside bodies
    /// of polymorphic functions.
    pub stype: TypeHandle,
    pub typemod: TypeModifier,
    pub agg_sort: Vec<NodeId>,
    pub agg_filter: Option<NodeId>,
    pub agg_set_modifier: Option<SetModifier>,
    pub partition: Vec<NodeId>,
    pub window: bool,
}

impl FunctionCallNode {
    /// Start building a call to the named function.
    pub fn build(
        func_shortname: impl Into<String>,
        stype: TypeHandle,
        typemod: TypeModifier,
    ) -> FunctionCallBuilder {
        FunctionCallBuilder {
            node: FunctionCallNode {
                func_shortname: func_shortname.into(),
                func_polymorphic: false,
                func_sql_function: None,
                func_initial_value: None,
                args: Vec::new(),
                params_typemods: Vec::new(),
                has_empty_variadic: false,
                variadic_param_type: None,
                stype,
                typemod,
                agg_sort: Vec::new(),
                agg_filter: None,
                agg_set_modifier: None,
                partition: Vec::new(),
                window: false,
            },
        }
    }
}

/// Builder for [`FunctionCallNode`].
///
/// Arguments are added together with their parameter typemod, which
/// keeps `args` and `params_typemods` aligned by construction.
pub struct FunctionCallBuilder {
    node: FunctionCallNode,
}

impl FunctionCallBuilder {
    pub fn polymorphic(mut self) -> Self {
        self.node.func_polymorphic = true;
        self
    }

    pub fn sql_function(mut self, name: impl Into<String>) -> Self {
        self.node.func_sql_function = Some(name.into());
        self
    }

    pub fn initial_value(mut self, value: NodeId) -> Self {
        self.node.func_initial_value = Some(value);
        self
    }

    pub fn arg(mut self, arg: NodeId, typemod: TypeModifier) -> Self {
        self.node.args.push(arg);
        self.node.params_typemods.push(typemod);
        self
    }

    pub fn variadic_param_type(mut self, stype: TypeHandle) -> Self {
        self.node.variadic_param_type = Some(stype);
        self
    }

    /// The variadic parameter exists but no arguments bind to it.
    pub fn empty_variadic(mut self) -> Self {
        self.node.has_empty_variadic = true;
        self
    }

    pub fn agg_sort(mut self, keys: Vec<NodeId>) -> Self {
        self.node.agg_sort = keys;
        self
    }

    pub fn agg_filter(mut self, filter: NodeId) -> Self {
        self.node.agg_filter = Some(filter);
        self
    }

    pub fn agg_set_modifier(mut self, modifier: SetModifier) -> Self {
        self.node.agg_set_modifier = Some(modifier);
        self
    }

    pub fn window(mut self, partition: Vec<NodeId>) -> Self {
        self.node.window = true;
        self.node.partition = partition;
        self
    }

    /// Validate and allocate the call node.
    pub fn finish(self, arena: &mut IrArena) -> Result<NodeId> {
        arena.function_call(self.node)
    }

    /// Consume the builder without allocating. The node is validated
    /// when it is handed to [`IrArena::function_call`].
    pub fn into_node(self) -> FunctionCallNode {
        self.node
    }
}

impl IrArena {
    /// Allocate a function call, checking the call-node invariants.
    ///
    /// Prefer [`FunctionCallNode::build`]; this entry point exists for
    /// callers assembling the node directly.
    pub fn function_call(&mut self, node: FunctionCallNode) -> Result<NodeId> {
        if node.args.len() != node.params_typemods.len() {
            return Err(IrError::Inconsistent(format!(
                "FunctionCall {}: {} args but {} params_typemods",
                node.func_shortname,
                node.args.len(),
                node.params_typemods.len()
            )));
        }
        if node.has_empty_variadic && node.variadic_param_type.is_none() {
            return Err(IrError::Inconsistent(format!(
                "FunctionCall {}: has_empty_variadic without a variadic parameter type",
                node.func_shortname
            )));
        }
        if !node.window && !node.partition.is_empty() {
            return Err(IrError::Inconsistent(format!(
                "FunctionCall {}: partition is only meaningful for window calls",
                node.func_shortname
            )));
        }
        Ok(self.alloc(Node::FunctionCall(node)))
    }
}
