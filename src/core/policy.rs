//! Authorization policy - Pure permission predicates over roles.
//!
//! Every gated operation names an [`Action`] and asks the rule table
//! whether the caller's role may perform it. The predicates read no
//! storage; callers resolve the role first and pass it in, so the rules
//! stay trivially testable and composable. Ownership-sensitive reads go
//! through [`can_read_order`], which also receives the ownership facts.

use crate::{
    core::roles::{Principal, Role},
    errors::{Error, Result},
};

/// Operations the policy gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Browse the menu; open to everyone
    ViewMenu,
    /// Create, update, or delete menu items
    MutateMenu,
    /// List the caller's own orders
    ViewOwnOrders,
    /// List every order in the system
    ViewAllOrders,
    /// List order lines assigned to the caller
    ViewAssignedOrders,
    /// Convert the caller's cart into an order
    CreateOrder,
    /// Attach delivery crew to an order, optionally moving its status
    AssignDeliveryCrew,
    /// Move an assigned order's status forward
    UpdateOrderStatus,
    /// Remove an order and its lines
    DeleteOrder,
    /// Read and mutate the caller's own cart
    ManageOwnCart,
    /// List, grant, and revoke manager group membership
    ManageManagerGroup,
    /// List, grant, and revoke delivery-crew group membership
    ManageDeliveryGroup,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ViewMenu => "view menu",
            Self::MutateMenu => "mutate menu",
            Self::ViewOwnOrders => "view own orders",
            Self::ViewAllOrders => "view all orders",
            Self::ViewAssignedOrders => "view assigned orders",
            Self::CreateOrder => "create order",
            Self::AssignDeliveryCrew => "assign delivery crew",
            Self::UpdateOrderStatus => "update order status",
            Self::DeleteOrder => "delete order",
            Self::ManageOwnCart => "manage own cart",
            Self::ManageManagerGroup => "manage manager group",
            Self::ManageDeliveryGroup => "manage delivery group",
        };
        write!(f, "{name}")
    }
}

/// The rule table: which role may perform which action.
#[must_use]
pub fn can(role: Role, action: Action) -> bool {
    match action {
        Action::ViewMenu => true,
        Action::MutateMenu
        | Action::ViewAllOrders
        | Action::AssignDeliveryCrew
        | Action::DeleteOrder
        | Action::ManageManagerGroup
        | Action::ManageDeliveryGroup => role.is_manager(),
        Action::ManageOwnCart | Action::CreateOrder | Action::ViewOwnOrders => {
            role == Role::Customer
        }
        Action::ViewAssignedOrders | Action::UpdateOrderStatus => role == Role::DeliveryCrew,
    }
}

/// Whether a role may read one specific order, given the ownership facts.
///
/// Managers read everything; customers read only orders they placed; crew
/// read only orders assigned to them.
#[must_use]
pub fn can_read_order(role: Role, is_owner: bool, is_assigned_crew: bool) -> bool {
    match role {
        Role::Manager | Role::Admin => true,
        Role::Customer => is_owner,
        Role::DeliveryCrew => is_assigned_crew,
    }
}

/// Rejects the operation with a typed denial unless the rule table allows
/// it.
pub fn authorize(principal: &Principal, action: Action) -> Result<()> {
    if can(principal.role, action) {
        Ok(())
    } else {
        Err(Error::Forbidden {
            role: principal.role.to_string(),
            action: action.to_string(),
        })
    }
}
