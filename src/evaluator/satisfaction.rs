use std::collections::HashMap;

use crate::model::activity::{Activity, ContractType};
use crate::model::constants::MAX_BLOCK;
use crate::model::day::{Block, Day};
use crate::model::professor_state::BlockInfo;

const OPTIMAL_OCCUPANCY_MIN: f64 = 0.75;
const OPTIMAL_OCCUPANCY_MAX: f64 = 0.95;
const MIN_STUDENTS: u32 = 9;
const MAX_STUDENTS: u32 = 70;
const MEETING_ROOM_THRESHOLD: u32 = 10;

const WEIGHT_CAPACITY: f64 = 0.25;
const WEIGHT_TIME_SLOT: f64 = 0.20;
const WEIGHT_CAMPUS: f64 = 0.20;
const WEIGHT_CONTINUITY: f64 = 0.15;
const WEIGHT_ACTIVITY: f64 = 0.20;

/// Pure 1-10 fit score for one candidate placement, weighing room capacity,
/// time-of-day preference, campus match, block continuity, and activity
/// type. No I/O, no actor context: everything the caller needs is passed
/// in explicitly.
pub struct Satisfaction;

impl Satisfaction {
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        room_capacity: u32,
        students_count: u32,
        level: u8,
        campus: &str,
        preferred_campus: &str,
        block: Block,
        existing_blocks: &HashMap<Day, Vec<BlockInfo>>,
        contract: ContractType,
        activity: Activity,
    ) -> u8 {
        if students_count > room_capacity {
            return 1;
        }

        if students_count < MIN_STUDENTS {
            if room_capacity < MEETING_ROOM_THRESHOLD {
                let ratio = students_count as f64 / room_capacity as f64;
                return if (0.5..=0.9).contains(&ratio) { 5 } else { 3 };
            }
            return 2;
        }

        if students_count > MAX_STUDENTS {
            return 2;
        }

        let capacity_score = Self::evaluate_capacity(room_capacity, students_count);
        let time_slot_score = Self::evaluate_time_slot(level, block);
        let campus_score = Self::evaluate_campus(campus, preferred_campus, existing_blocks);
        let continuity_score = Self::evaluate_continuity(existing_blocks, contract);
        let activity_score = Self::evaluate_activity_type(activity, block);

        let weighted = (capacity_score * WEIGHT_CAPACITY
            + time_slot_score * WEIGHT_TIME_SLOT
            + campus_score * WEIGHT_CAMPUS
            + continuity_score * WEIGHT_CONTINUITY
            + activity_score * WEIGHT_ACTIVITY)
            * 10.0;

        weighted.round().clamp(1.0, 10.0) as u8
    }

    fn evaluate_capacity(room_capacity: u32, students_count: u32) -> f64 {
        if students_count < MEETING_ROOM_THRESHOLD {
            if room_capacity < MEETING_ROOM_THRESHOLD {
                let ratio = students_count as f64 / room_capacity as f64;
                return if (0.5..=0.9).contains(&ratio) { 1.0 } else { 0.8 };
            }
            return if room_capacity <= students_count * 5 { 0.7 } else { 0.5 };
        }

        let occupancy = students_count as f64 / room_capacity as f64;
        if (OPTIMAL_OCCUPANCY_MIN..=OPTIMAL_OCCUPANCY_MAX).contains(&occupancy) {
            1.0
        } else if occupancy < OPTIMAL_OCCUPANCY_MIN {
            0.7 + (occupancy / OPTIMAL_OCCUPANCY_MIN) * 0.3
        } else if occupancy <= 1.0 {
            0.8
        } else {
            0.1
        }
    }

    fn evaluate_time_slot(level: u8, block: Block) -> f64 {
        if block < 1 || block > MAX_BLOCK {
            return 0.0;
        }

        let is_first_year = level <= 2;
        let is_odd_level = level % 2 == 1;

        if is_first_year {
            return if block <= 4 { 1.0 } else { 0.6 };
        }

        if (is_odd_level && block <= 4) || (!is_odd_level && block >= 5) {
            1.0
        } else {
            0.7
        }
    }

    fn evaluate_activity_type(activity: Activity, block: Block) -> f64 {
        match activity {
            Activity::Teoria => {
                if block <= 4 {
                    1.0
                } else {
                    0.6
                }
            }
            Activity::Laboratorio | Activity::Taller | Activity::Practica => {
                if block >= 5 {
                    1.0
                } else {
                    0.7
                }
            }
            Activity::Ayudantia | Activity::Tutoria => 1.0,
        }
    }

    fn evaluate_campus(campus: &str, preferred_campus: &str, existing_blocks: &HashMap<Day, Vec<BlockInfo>>) -> f64 {
        if campus != preferred_campus {
            let has_other_campus = existing_blocks.values().any(|blocks| !blocks.is_empty());
            if has_other_campus {
                return 0.5;
            }
        }
        if campus == preferred_campus {
            1.0
        } else {
            0.7
        }
    }

    fn evaluate_continuity(existing_blocks: &HashMap<Day, Vec<BlockInfo>>, contract: ContractType) -> f64 {
        if contract == ContractType::PartTime {
            return 1.0;
        }

        let mut score = 1.0;
        for blocks in existing_blocks.values() {
            if blocks.len() < 2 {
                continue;
            }
            let mut sorted: Vec<Block> = blocks.iter().map(|b| b.block).collect();
            sorted.sort_unstable();
            for window in sorted.windows(2) {
                let gap = window[1] as i32 - window[0] as i32 - 1;
                if gap > 1 {
                    score *= 0.6;
                } else if gap == 1 {
                    score *= 0.9;
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_capacity_is_always_one() {
        let score = Satisfaction::calculate(20, 25, 3, "north", "north", 1, &HashMap::new(), ContractType::FullTime, Activity::Teoria);
        assert_eq!(score, 1);
    }

    #[test]
    fn small_class_good_meeting_room_ratio() {
        let score = Satisfaction::calculate(9, 6, 1, "north", "north", 1, &HashMap::new(), ContractType::FullTime, Activity::Teoria);
        assert_eq!(score, 5);
    }

    #[test]
    fn oversized_class_is_penalized() {
        let score = Satisfaction::calculate(100, 75, 3, "north", "north", 1, &HashMap::new(), ContractType::FullTime, Activity::Teoria);
        assert_eq!(score, 2);
    }

    #[test]
    fn optimal_occupancy_morning_theory_first_year_scores_high() {
        let score = Satisfaction::calculate(30, 27, 1, "north", "north", 2, &HashMap::new(), ContractType::FullTime, Activity::Teoria);
        assert_eq!(score, 10);
    }

    #[test]
    fn part_time_ignores_continuity_gaps() {
        let mut existing = HashMap::new();
        existing.insert(Day::Monday, vec![BlockInfo { campus: "north".into(), block: 1 }, BlockInfo { campus: "north".into(), block: 4 }]);
        let score = Satisfaction::calculate(30, 27, 1, "north", "north", 2, &existing, ContractType::PartTime, Activity::Teoria);
        assert!(score >= 9);
    }
}
