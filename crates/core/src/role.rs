// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent roles: a total function from role to handler descriptor (spec §9
//! "Handler polymorphism" redesign note) rather than a class hierarchy.

/// Closed enum of handler identities. Each value maps statically to a
/// [`RoleDescriptor`] via [`AgentRole::descriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Orchestrator,
    Messaging,
    Payments,
    Banking,
    Trading,
    MarketData,
    Research,
}

crate::simple_display! {
    AgentRole {
        Orchestrator => "orchestrator",
        Messaging => "messaging",
        Payments => "payments",
        Banking => "banking",
        Trading => "trading",
        MarketData => "market_data",
        Research => "research",
    }
}

/// Static description of a role: its identity string, the tool names it may
/// invoke, and preferred model decoding parameters. Pure data — no trait
/// object, no class hierarchy (spec §9).
#[derive(Debug, Clone)]
pub struct RoleDescriptor {
    pub role: AgentRole,
    pub identity: &'static str,
    pub allowed_tools: &'static [&'static str],
    pub temperature: f32,
}

impl AgentRole {
    /// Total function over every variant — the single source of truth for
    /// role capabilities (spec §9).
    pub fn descriptor(self) -> RoleDescriptor {
        match self {
            AgentRole::Orchestrator => RoleDescriptor {
                role: self,
                identity: "orchestrator",
                allowed_tools: &[],
                temperature: 0.0,
            },
            AgentRole::Messaging => RoleDescriptor {
                role: self,
                identity: "messaging handler",
                allowed_tools: &["send_message", "list_channels"],
                temperature: 0.3,
            },
            AgentRole::Payments => RoleDescriptor {
                role: self,
                identity: "payments handler",
                allowed_tools: &["charge_card", "refund_payment"],
                temperature: 0.0,
            },
            AgentRole::Banking => RoleDescriptor {
                role: self,
                identity: "banking handler",
                allowed_tools: &["initiate_transfer", "check_balance"],
                temperature: 0.0,
            },
            AgentRole::Trading => RoleDescriptor {
                role: self,
                identity: "trading handler",
                allowed_tools: &["place_order", "cancel_order"],
                temperature: 0.1,
            },
            AgentRole::MarketData => RoleDescriptor {
                role: self,
                identity: "market data handler",
                allowed_tools: &["quote_lookup"],
                temperature: 0.2,
            },
            AgentRole::Research => RoleDescriptor {
                role: self,
                identity: "research handler",
                allowed_tools: &["web_search", "ocr_extract"],
                temperature: 0.5,
            },
        }
    }

    pub fn allows_tool(self, tool_name: &str) -> bool {
        self.descriptor().allowed_tools.contains(&tool_name)
    }
}

#[cfg(test)]
#[path = "role_tests.rs"]
mod tests;
