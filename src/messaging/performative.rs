use serde::{Deserialize, Serialize};

/// FIPA-ACL performative carried by an `Envelope`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Performative {
    Cfp,
    Propose,
    Refuse,
    AcceptProposal,
    RejectProposal,
    Inform,
    Cancel,
    Request,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Protocol {
    ContractNet,
    TurnControl,
    SystemControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ontology {
    RoomNegotiation,
    TurnControl,
    SystemControl,
}
