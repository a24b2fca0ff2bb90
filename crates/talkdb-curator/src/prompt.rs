//! Classification prompt sent once per batch.

use talkdb_core::NewsItem;

const INSTRUCTIONS: &str = r#"뉴스를 간결한 대화 주제로 변환하세요.

**절대 제외 (UNSAFE):**
- 정치: 선거, 국회, 의원, 대통령, 장관, 정당, 정책
- 범죄: 살인, 폭행, 성범죄, 절도
- 사고: 사망, 화재, 붕괴, 추락
- 인명: 정치인 이름

**포함 (SAFE):**
- 연예: 영화, 드라마, 예능, 음악, 연예인
- 스포츠: 축구, 야구, 농구, 경기
- 음식: 맛집, 카페, 신메뉴, 레시피
- IT: 스마트폰, 앱, 게임, 신제품
- 라이프: 여행, 패션, 건강, 반려동물

**제목 규칙:**
- 간결하고 자연스러운 제목만 사용
- "아세요?", "보셨어요?", "하시나요?" 같은 질문형 금지
- 좋은 예: "손흥민 해트트릭", "GS25 신상 디저트"
- 나쁜 예: "손흥민 아세요?"

description은 1~2문장, category는 entertain|sports|food|tech|life,
situation은 company|date|friend 중 하나 이상, age_group은 20s|30s|40s|all."#;

const EXAMPLE: &str = r#"[{"original_title":"","is_safe":true,"talk_topic":"손흥민 해트트릭","description":"시즌 첫 해트트릭으로 팀 승리를 이끌었다","conversation_tip":"","category":"sports","situation":["company","friend"],"age_group":"all"}]"#;

/// Build the prompt for one batch, numbering the headlines from 1.
#[must_use]
pub fn build_prompt(batch: &[&NewsItem]) -> String {
    let headlines = batch
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item.title))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{INSTRUCTIONS}\n\n뉴스:\n{headlines}\n\nJSON 배열만 답하세요:\n{EXAMPLE}")
}
