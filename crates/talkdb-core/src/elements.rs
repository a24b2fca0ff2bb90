//! Five-elements (오행) profile and team compatibility calculator.
//!
//! This is a simplified, deterministic calculation for entertainment: it
//! counts the elements of the year, month, day and (optionally) hour pillars
//! derived from a birth date and scores how evenly a team covers them.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    /// Canonical order. Ties between elements are always resolved in this order.
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Wood => "목(木)",
            Self::Fire => "화(火)",
            Self::Earth => "토(土)",
            Self::Metal => "금(金)",
            Self::Water => "수(水)",
        }
    }

    /// The element this one feeds in the generating cycle.
    fn generates(self) -> Element {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The element this one overcomes in the controlling cycle.
    fn controls(self) -> Element {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }
}

// 갑 을 병 정 무 기 경 신 임 계
const STEM_ELEMENTS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

// 자 축 인 묘 진 사 오 미 신 유 술 해
const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub wood: u32,
    pub fire: u32,
    pub earth: u32,
    pub metal: u32,
    pub water: u32,
}

impl ElementCounts {
    #[must_use]
    pub fn get(&self, element: Element) -> u32 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    fn slot(&mut self, element: Element) -> &mut u32 {
        match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        }
    }

    fn add(&mut self, other: &ElementCounts) {
        for element in Element::ALL {
            *self.slot(element) += other.get(element);
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        Element::ALL.iter().map(|e| self.get(*e)).sum()
    }

    /// Elements ordered by count descending; equal counts keep canonical order.
    fn ranked(&self) -> [Element; 5] {
        let mut ranked = Element::ALL;
        ranked.sort_by(|a, b| self.get(*b).cmp(&self.get(*a)));
        ranked
    }

    #[must_use]
    pub fn dominant(&self) -> Element {
        self.ranked()[0]
    }
}

/// Count the elements of one person's pillars.
#[must_use]
pub fn calculate_elements(birth_date: NaiveDate, birth_time: Option<NaiveTime>) -> ElementCounts {
    let mut counts = ElementCounts::default();

    let year = i64::from(birth_date.year());
    let month = i64::from(birth_date.month());
    let day = i64::from(birth_date.day());

    *counts.slot(stem(year)) += 1;
    *counts.slot(branch(year)) += 1;

    *counts.slot(branch(month - 1)) += 1;

    let day_offset = (year * 365 + month * 30 + day).rem_euclid(60);
    *counts.slot(stem(day_offset)) += 1;
    *counts.slot(branch(day_offset)) += 1;

    if let Some(time) = birth_time {
        *counts.slot(branch(i64::from(time.hour() / 2))) += 1;
    }

    counts
}

fn stem(index: i64) -> Element {
    // rem_euclid(10) is always in 0..10
    STEM_ELEMENTS[usize::try_from(index.rem_euclid(10)).unwrap_or_default()]
}

fn branch(index: i64) -> Element {
    BRANCH_ELEMENTS[usize::try_from(index.rem_euclid(12)).unwrap_or_default()]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberProfile {
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_time: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberElements {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<NaiveTime>,
    pub elements: ElementCounts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Generating,
    Controlling,
    Peaceful,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairRelation {
    pub person1: String,
    pub person2: String,
    pub relation: Relation,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamAnalysis {
    pub compatibility: f64,
    pub team_elements: ElementCounts,
    pub insights: Vec<String>,
    pub relationships: Vec<PairRelation>,
    pub members: Vec<MemberElements>,
}

const MAX_RELATIONSHIPS: usize = 5;

/// Score how evenly a team covers the five elements.
///
/// # Errors
///
/// Returns [`CoreError::TooFewMembers`] when fewer than two members are given.
pub fn analyze_team(members: &[MemberProfile]) -> Result<TeamAnalysis, CoreError> {
    if members.len() < 2 {
        return Err(CoreError::TooFewMembers(members.len()));
    }

    let members: Vec<MemberElements> = members
        .iter()
        .map(|m| MemberElements {
            name: m.name.clone(),
            birth_date: m.birth_date,
            birth_time: m.birth_time,
            elements: calculate_elements(m.birth_date, m.birth_time),
        })
        .collect();

    let mut team = ElementCounts::default();
    for member in &members {
        team.add(&member.elements);
    }

    let avg = f64::from(team.total()) / 5.0;
    let variance = Element::ALL
        .iter()
        .map(|e| (f64::from(team.get(*e)) - avg).powi(2))
        .sum::<f64>()
        / 5.0;
    let compatibility = (100.0 - variance.sqrt() * 10.0).clamp(0.0, 100.0);

    let insights = team_insights(&team, avg, compatibility);

    let mut relationships = Vec::new();
    'pairs: for (i, first) in members.iter().enumerate() {
        for second in &members[i + 1..] {
            if relationships.len() == MAX_RELATIONSHIPS {
                break 'pairs;
            }
            let (relation, description) =
                relate(first.elements.dominant(), second.elements.dominant());
            relationships.push(PairRelation {
                person1: first.name.clone(),
                person2: second.name.clone(),
                relation,
                description,
            });
        }
    }

    Ok(TeamAnalysis {
        compatibility,
        team_elements: team,
        insights,
        relationships,
        members,
    })
}

fn team_insights(team: &ElementCounts, avg: f64, compatibility: f64) -> Vec<String> {
    let ranked = team.ranked();
    let strongest = ranked[0];
    let weakest = ranked[4];
    let mut insights = Vec::new();

    if f64::from(team.get(strongest)) > avg * 1.5 {
        insights.push(format!(
            "팀에 {}기운이 매우 강합니다. 추진력과 에너지가 넘치는 팀입니다!",
            strongest.label()
        ));
    }
    if f64::from(team.get(weakest)) < avg * 0.5 {
        insights.push(format!(
            "{}기운이 부족합니다. 이 부분을 보완할 멤버가 필요할 수 있어요.",
            weakest.label()
        ));
    }

    let tier = if compatibility >= 80.0 {
        "오행 밸런스가 훌륭합니다! 조화로운 팀워크가 기대됩니다."
    } else if compatibility >= 60.0 {
        "전반적으로 좋은 궁합입니다. 서로 보완하며 성장할 수 있어요."
    } else {
        "오행 편차가 있지만, 이를 인지하고 소통하면 극복할 수 있습니다!"
    };
    insights.push(tier.to_string());

    insights
}

fn relate(first: Element, second: Element) -> (Relation, &'static str) {
    if first.generates() == second {
        (Relation::Generating, "서로를 발전시키는 관계입니다")
    } else if second.generates() == first {
        (Relation::Generating, "서로를 북돋우는 좋은 관계입니다")
    } else if first.controls() == second || second.controls() == first {
        (Relation::Controlling, "견제하며 균형을 이루는 관계입니다")
    } else {
        (Relation::Peaceful, "안정적이고 편안한 관계입니다")
    }
}
