//! Instruction template sent to the language model.
//!
//! The template is Korean because the generated scenario is consumed by
//! Korean-speaking high school students. Everything outside the
//! "사용자가 입력한 정보" block is fixed text.

use super::dto::{ConfessionRequest, PersonProfile};

const PERSONA: &str = "\
당신은 지금부터 **17세 고등학생을 위한 고백 전문가**입니다. 저에게 고백 상황에 대한 정보를 주시면, 그 정보를 바탕으로 상대방에게 고백할 **고백 멘트**와 **고백 계획**, 그리고 **거절당했을 경우의 대처 멘트**를 구성하여 상세하게 알려드리겠습니다. 답변은 항상 **정중한 존댓말**로 작성해 주세요.";

const PLAN_RULES: &str = "\
2.  **고백 계획**:
    * 총 **3단계**로 나누어 구성해 주세요.
    * 각 단계는 **100자 이내**로 간결하게 작성해 주세요.
    * 현실적이고 실행 가능한 고등학생 수준의 계획이어야 합니다.
    * 설명을 할 때는 **존댓말**을 사용해 주세요.
3.  **거절 시 대처 방안**:
    * **200자 이내**로 작성해 주세요.
    * 다음 두 가지 요소를 반드시 포함해야 합니다:
        * **상대방에게 할 말**: 담담하고 쿨하게 상황을 받아들이며 관계 유지를 원하는 멘트를 고등학생 말투로 작성해주세요. (반말 사용)
        * **스스로를 다독이는 내용**: 자신의 감정에 솔직했던 것에 대한 긍정적인 평가와 함께 스스로를 격려하는 내용을 포함해 주세요.
    * 실제 대화처럼 길게 늘어지는 구체적인 대사나 행동 지시(예: 'ㅋㅋㅋ', '어깨 툭 치기', '속으로')는 절대 포함하지 마십시오.
    * 담담하고 차분한 톤으로 작성하며, 오글거리거나 장난스러운 표현은 피하도록 안내해 주세요.
    * 설명을 할 때는 **존댓말**을 사용해 주세요.
4.  **어떠한 서두나 인사말도 없이, 바로 '고백 멘트:', '고백 계획:', '거절 시 대처 방안:' 순서로 내용을 시작해주세요.**
5.  **고백 계획에는 '*'을 넣지 마세요.**";

const OUTPUT_EXAMPLE: &str = "\
### **출력 예시:**

고백 멘트 :
준성아, 한 달 동안 같이 지내면서 너랑 이야기하고, 웃고, 같이 있는 시간이 너무 좋았어.
너 생각하면 나도 모르게 웃음이 나고, 하루가 더 기대돼. 그래서 말하려고 해. 너를 더 알고 싶고, 더 가까워지고 싶어. 나랑 진지하게 만나볼래?

고백 계획 :
1. 자연스러운 약속 잡기: ...
2. 공통점으로 분위기 풀기: ...
3. 진심을 담아 고백하기: ...

거절 시 대처 방안 :
\"괜찮아! 그냥 제 마음 솔직하게 전하고 싶었어요. 그래도 앞으로 우리 둘이 편하게 지내는 건 변함없겠죠?\"라고 말하며 쿨한 모습을 보여주세요. ...";

const REFERENCE_LINES: &[&str] = &[
    "민준아, 처음 만났을 때 너가 수학숙제 도와준 것도, 급식실에서 우유 대신 네가 준 간식도 아직 생각나. 그런 작은 순간마다 네가 내 맘속에 스며들었어. 웃을 때마다 내 하루가 더 밝아졌어. 이런 나의 진심, 너에게 전하고 싶어. 나 너를 좋아해.",
    "유림아, 너랑 대화하고, 같이 공부하고, 영화 얘기할 때마다 나도 뭔가 더 나은 사람 되는 기분이야. 네가 있어서 공부도 더 재미있고, 하루가 더 충실해. 이런 너에게 솔직해지고 싶어서. 앞으로도 네 옆에서 함께 있고 싶어. 나, 네가 정말 좋아.",
    "시웅아, 네가 웃는 모습을 보면 햇살 같아서, 어두웠던 하루도 환해져. 네 목소리가 하루의 배경음악 같아서, 그냥 들어도 기분이 좋아. 그래서 오늘 이렇게 솔직해지려고 해. 나, 너를 좋아해.",
    "정원아, 솔직히 너한테 고백하는 거 떨려. 근데 이 마음 전하지 않으면 후회할 것 같아서 용기 냈어. 나 너 좋아해!",
    "민재야, 널 처음 봤을 때부터 뭔가 끌렸어. 같이 있으면 시간 가는 줄 모르겠고, 매일매일 더 좋아지는 것 같아. 내 마음 받아줄래?",
];

pub fn render_prompt(req: &ConfessionRequest) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str(PERSONA);
    out.push_str("\n\n---\n\n### **출력 지침:**\n\n");
    out.push_str(&format!(
        "1.  **고백 멘트**:\n    * \"{}아,\"로 시작해야 합니다.\n    \
         * **100자 이내**로, 진심이 담기고 자연스러운 고등학생 말투로 작성해 주세요. \
         (고백 멘트 자체는 고백 당사자의 말투이므로 반말 유지)\n    \
         * 지나치게 오글거리거나 과장된 표현은 피하고, 따뜻하고 진솔한 느낌이 들도록 해 주세요.\n",
        req.crush_info.name
    ));
    out.push_str(PLAN_RULES);

    out.push_str("\n\n---\n\n### **사용자가 입력한 정보 (이 정보를 바탕으로 시나리오를 생성해 주세요):**\n\n");
    push_profile(&mut out, "내 이름", &req.user_info);
    push_profile(&mut out, "상대 이름", &req.crush_info);
    out.push_str(&format!("썸 탄 기간 : {}\n", req.sum_period));
    out.push_str(&format!("고백 방식 : {}\n", req.confession_method));

    out.push_str("\n---\n");
    out.push_str(OUTPUT_EXAMPLE);

    out.push_str("\n\n---\n### **참고 고백 멘트 풀 (아래 멘트들을 참고하여 새로운 멘트 하나를 생성하세요):**\n");
    for line in REFERENCE_LINES {
        out.push_str("* ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn push_profile(out: &mut String, name_label: &str, p: &PersonProfile) {
    out.push_str(&format!("{name_label} : {}\n", p.name));
    out.push_str(&format!("나이 : {}세\n", p.age));
    out.push_str(&format!("성격 : {}\n", p.personality));
    out.push_str(&format!("좋아하는 것 : {}\n", p.likes.join(", ")));
}
