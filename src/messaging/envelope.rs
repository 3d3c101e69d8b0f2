use actix::{Message, Recipient};
use uuid::Uuid;

use super::bodies::{AcceptProposalBody, CancelBody, CfpBody, InformBody, ProposeBody, RefuseBody, StartBody};
use super::performative::{Ontology, Performative, Protocol};

#[derive(Debug, Clone)]
pub enum Payload {
    Cfp(CfpBody),
    Propose(ProposeBody),
    Refuse(RefuseBody),
    AcceptProposal(AcceptProposalBody),
    Inform(InformBody),
    Cancel(CancelBody),
    Start(StartBody),
}

/// The one message type every agent actor exchanges. Mirrors a FIPA-ACL
/// envelope: routing/conversation metadata plus a typed payload. `sender`
/// lets a recipient reply directly without a Directory round trip.
#[derive(Clone, Message)]
#[rtype(result = "()")]
pub struct Envelope {
    pub performative: Performative,
    pub protocol: Protocol,
    pub ontology: Ontology,
    pub conversation_id: Uuid,
    pub correlation_id: Uuid,
    /// Directory id of the sending agent, for matching replies against an
    /// expected-responders set without a routing round trip.
    pub from: String,
    pub sender: Recipient<Envelope>,
    pub payload: Payload,
}

impl Envelope {
    pub fn reply(&self, performative: Performative, from: String, sender: Recipient<Envelope>, payload: Payload) -> Envelope {
        Envelope {
            performative,
            protocol: self.protocol,
            ontology: self.ontology,
            conversation_id: self.conversation_id,
            correlation_id: self.correlation_id,
            from,
            sender,
            payload,
        }
    }
}
