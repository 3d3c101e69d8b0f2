use std::collections::HashMap;

use crate::model::activity::Activity;
use crate::model::assignment::{EvaluatedProposal, Proposal};
use crate::model::constants::{MAX_BLOCK, MEETING_ROOM_THRESHOLD};
use crate::model::day::Day;
use crate::model::professor_state::ProfessorState;
use crate::model::subject::Subject;

use super::satisfaction::Satisfaction;

/// Applies the hard constraints and weighted scoring a professor uses to
/// rank room proposals for one subject block. Pure and synchronous: all
/// state it needs (the professor's existing placements) is passed in.
pub struct ConstraintEvaluator;

impl ConstraintEvaluator {
    /// `instance_key` disambiguates parallel sections of the same subject
    /// code. `remaining_blocks` is the subject's still-unplaced block count
    /// *before* this proposal would be committed, feeding the block-9
    /// parity rule.
    pub fn evaluate(proposal: &Proposal, subject: &Subject, professor: &ProfessorState, instance_key: &str, remaining_blocks: u32) -> EvaluatedProposal {
        if !Self::is_valid_proposal(proposal, subject, professor, instance_key, remaining_blocks) {
            return EvaluatedProposal { valid: false, score: 0, satisfaction: 0 };
        }

        let satisfaction = Satisfaction::calculate(
            proposal.capacity,
            subject.enrollment,
            subject.level,
            &proposal.campus,
            &subject.campus,
            proposal.block,
            &professor.blocks_by_day,
            professor.contract,
            subject.activity,
        );

        let score = Self::calculate_total_score(proposal, subject, professor, instance_key, satisfaction);
        EvaluatedProposal { valid: true, score, satisfaction }
    }

    fn is_valid_proposal(proposal: &Proposal, subject: &Subject, professor: &ProfessorState, instance_key: &str, remaining_blocks: u32) -> bool {
        let needs_meeting_room = subject.needs_meeting_room();
        let is_meeting_room = proposal.capacity < MEETING_ROOM_THRESHOLD;

        if needs_meeting_room {
            if !is_meeting_room && proposal.capacity > subject.enrollment * 4 {
                return false;
            }
        } else if is_meeting_room {
            return false;
        }

        if !Self::check_campus_constraints(proposal, subject, professor) {
            return false;
        }

        let existing_instance_today = professor.instance_blocks_on(proposal.day, instance_key);
        if existing_instance_today >= 2 {
            return false;
        }

        if !subject.activity.exempt_from_continuity_cap() {
            let mut combined: Vec<u8> = professor
                .blocks_by_day_instance
                .get(&(proposal.day, instance_key.to_string()))
                .cloned()
                .unwrap_or_default();
            combined.push(proposal.block);
            combined.sort_unstable();
            if Self::longest_run(&combined) > 2 {
                return false;
            }
        }

        if !(1..=MAX_BLOCK).contains(&proposal.block) {
            return false;
        }
        if proposal.block == MAX_BLOCK && remaining_blocks % 2 == 0 {
            return false;
        }

        let is_odd_level = subject.level % 2 == 1;
        if is_odd_level {
            if proposal.block > 4 && proposal.block != MAX_BLOCK {
                return false;
            }
        } else if proposal.block < 5 {
            let satisfaction = Satisfaction::calculate(
                proposal.capacity,
                subject.enrollment,
                subject.level,
                &proposal.campus,
                &subject.campus,
                proposal.block,
                &professor.blocks_by_day,
                professor.contract,
                subject.activity,
            );
            if satisfaction < 8 {
                return false;
            }
        }

        Self::validate_idle_gap(proposal, professor)
    }

    fn longest_run(sorted_blocks: &[u8]) -> usize {
        if sorted_blocks.is_empty() {
            return 0;
        }
        let mut longest = 1;
        let mut current = 1;
        for window in sorted_blocks.windows(2) {
            if window[1] == window[0] + 1 {
                current += 1;
                longest = longest.max(current);
            } else if window[1] != window[0] {
                current = 1;
            }
        }
        longest
    }

    fn check_campus_constraints(proposal: &Proposal, subject: &Subject, professor: &ProfessorState) -> bool {
        if proposal.campus == subject.campus {
            return true;
        }

        if Self::has_existing_transition_in_day(professor, proposal.day) {
            return false;
        }

        Self::validate_transition_buffer(proposal, professor)
    }

    fn validate_transition_buffer(proposal: &Proposal, professor: &ProfessorState) -> bool {
        let blocks = professor.blocks_on(proposal.day);
        let prev = blocks.iter().find(|b| b.block == proposal.block.saturating_sub(1));
        let next = blocks.iter().find(|b| b.block == proposal.block + 1);

        if let Some(prev) = prev {
            if prev.campus != proposal.campus {
                return !blocks.iter().any(|b| b.block == proposal.block.saturating_sub(1));
            }
        }
        if let Some(next) = next {
            if next.campus != proposal.campus {
                return !blocks.iter().any(|b| b.block == proposal.block + 1);
            }
        }
        true
    }

    fn has_existing_transition_in_day(professor: &ProfessorState, day: Day) -> bool {
        let blocks = professor.blocks_on(day);
        if blocks.is_empty() {
            return false;
        }
        let mut sorted: Vec<_> = blocks.iter().collect();
        sorted.sort_by_key(|b| b.block);
        let mut previous_campus: Option<&str> = None;
        for block in sorted {
            if let Some(prev) = previous_campus {
                if prev != block.campus {
                    return true;
                }
            }
            previous_campus = Some(&block.campus);
        }
        false
    }

    fn validate_idle_gap(proposal: &Proposal, professor: &ProfessorState) -> bool {
        if professor.contract == crate::model::activity::ContractType::PartTime {
            return true;
        }
        let mut blocks: Vec<u8> = professor.blocks_on(proposal.day).iter().map(|b| b.block).collect();
        blocks.push(proposal.block);
        blocks.sort_unstable();
        blocks.dedup();

        let mut consecutive_gap = 0i32;
        for window in blocks.windows(2) {
            let gap = window[1] as i32 - window[0] as i32 - 1;
            if gap > 0 {
                consecutive_gap += gap;
                if consecutive_gap > 1 {
                    return false;
                }
            } else {
                consecutive_gap = 0;
            }
        }
        true
    }

    fn calculate_total_score(proposal: &Proposal, subject: &Subject, professor: &ProfessorState, instance_key: &str, satisfaction: u8) -> i64 {
        let mut score = Self::base_score(proposal, subject, professor, instance_key, satisfaction);
        score = Self::apply_meeting_room_score(score, proposal, subject);
        score = Self::apply_day_based_scoring(score, proposal, subject, professor, instance_key);
        score.max(1)
    }

    fn base_score(proposal: &Proposal, subject: &Subject, professor: &ProfessorState, instance_key: &str, satisfaction: u8) -> i64 {
        let mut score: i64 = if proposal.campus == subject.campus { 10000 } else { -10000 };

        let is_odd_level = subject.level % 2 == 1;
        if (is_odd_level && proposal.block <= 4) || (!is_odd_level && proposal.block >= 5) {
            score += 3000;
        }

        if professor.contract != crate::model::activity::ContractType::PartTime {
            if let Some(existing) = professor.blocks_by_day_instance.get(&(proposal.day, instance_key.to_string())) {
                if let Some(&nearest) = existing.iter().min_by_key(|b| (**b as i32 - proposal.block as i32).abs()) {
                    let gap = (nearest as i32 - proposal.block as i32).abs();
                    if gap <= 2 {
                        score += 5000;
                    } else {
                        score -= 8000;
                    }
                }
            }
        }

        score += satisfaction as i64 * 10;
        score -= (proposal.capacity as i64 - subject.enrollment as i64).abs() * 100;
        score
    }

    fn apply_meeting_room_score(mut score: i64, proposal: &Proposal, subject: &Subject) -> i64 {
        let needs_meeting_room = subject.needs_meeting_room();
        let is_meeting_room = proposal.capacity < MEETING_ROOM_THRESHOLD;

        if needs_meeting_room {
            if is_meeting_room {
                score += 15000;
                if (proposal.capacity as i64 - subject.enrollment as i64).unsigned_abs() <= 2 {
                    score += 5000;
                }
            } else {
                let oversize = proposal.capacity as i64 - subject.enrollment as i64;
                score -= oversize * 500;
            }
        }
        score
    }

    fn apply_day_based_scoring(mut score: i64, proposal: &Proposal, subject: &Subject, professor: &ProfessorState, instance_key: &str) -> i64 {
        let day_usage = professor.instance_blocks_on(proposal.day, instance_key) as i64;
        score -= day_usage * 6000;
        if day_usage == 0 {
            score += 8000;
        }

        let most_used_room = Self::most_used_room(professor, &subject.code);
        if most_used_room.as_deref() == Some(proposal.room_code.as_str()) {
            score += 7000;
        }

        if proposal.campus != subject.campus {
            score -= 10000;
            let blocks = professor.blocks_on(proposal.day);
            let prev = blocks.iter().find(|b| b.block == proposal.block.saturating_sub(1));
            let next = blocks.iter().find(|b| b.block == proposal.block + 1);
            let transition = prev.map(|b| b.campus != subject.campus).unwrap_or(false) || next.map(|b| b.campus != subject.campus).unwrap_or(false);
            if transition {
                score -= 8000;
            }
        }

        let room_count = professor.assignments.iter().filter(|a| a.subject_code == subject.code && a.room_code == proposal.room_code).count() as i64;
        score -= room_count * 1500;

        if day_usage >= 2 {
            score -= 6000;
        }

        score
    }

    fn most_used_room(professor: &ProfessorState, subject_code: &str) -> Option<String> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for a in &professor.assignments {
            if a.subject_code == subject_code {
                *counts.entry(a.room_code.as_str()).or_default() += 1;
            }
        }
        counts.into_iter().max_by_key(|(_, count)| *count).map(|(room, _)| room.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::activity::ContractType;

    fn subject() -> Subject {
        Subject { code: "CC101".into(), name: "Algorithms".into(), campus: "north".into(), enrollment: 30, level: 1, activity: Activity::Teoria, hours_required: 4 }
    }

    fn professor() -> ProfessorState {
        ProfessorState::new("Ada", "north", 0, ContractType::FullTime)
    }

    #[test]
    fn rejects_block_outside_range() {
        let p = Proposal { room_code: "R1".into(), campus: "north".into(), capacity: 35, day: Day::Monday, block: 10 };
        let result = ConstraintEvaluator::evaluate(&p, &subject(), &professor(), "CC101#0", 4);
        assert!(!result.valid);
    }

    #[test]
    fn accepts_fresh_morning_block_for_odd_level() {
        let p = Proposal { room_code: "R1".into(), campus: "north".into(), capacity: 32, day: Day::Monday, block: 2 };
        let result = ConstraintEvaluator::evaluate(&p, &subject(), &professor(), "CC101#0", 4);
        assert!(result.valid);
        assert!(result.score > 0);
    }

    #[test]
    fn rejects_even_level_morning_block_with_low_satisfaction() {
        let mut s = subject();
        s.level = 4;
        s.activity = Activity::Laboratorio;
        let mut prof = professor();
        prof.blocks_by_day.insert(
            Day::Monday,
            vec![crate::model::professor_state::BlockInfo { campus: "north".into(), block: 5 }, crate::model::professor_state::BlockInfo { campus: "north".into(), block: 8 }],
        );
        let p = Proposal { room_code: "R1".into(), campus: "south".into(), capacity: 32, day: Day::Monday, block: 2 };
        let result = ConstraintEvaluator::evaluate(&p, &s, &prof, "CC101#0", 4);
        assert!(!result.valid);
    }

    #[test]
    fn rejects_block_nine_when_remaining_even() {
        let p = Proposal { room_code: "R1".into(), campus: "north".into(), capacity: 32, day: Day::Monday, block: 9 };
        let result = ConstraintEvaluator::evaluate(&p, &subject(), &professor(), "CC101#0", 4);
        assert!(!result.valid);
    }

    #[test]
    fn rejects_third_block_same_day_same_instance() {
        let mut prof = professor();
        prof.blocks_by_day_instance.insert((Day::Monday, "CC101#0".into()), vec![1, 2]);
        let p = Proposal { room_code: "R1".into(), campus: "north".into(), capacity: 32, day: Day::Monday, block: 3 };
        let result = ConstraintEvaluator::evaluate(&p, &subject(), &prof, "CC101#0", 4);
        assert!(!result.valid);
    }
}
