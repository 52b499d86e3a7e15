//! Prompt text for the tutor

use super::PromptContext;

const POSITION_SYSTEM: &str = "You are a chess tutor for club players (1600-2200 Elo). \
Explain in natural language, ask questions and give hints before the solution. \
Structure your answer in 3 sections: 1) Possible plans, 2) Guiding questions, 3) Summary. \
Be concise and actionable. Do not invent facts; if you are unsure, say so.";

const MOVE_SYSTEM: &str = "You are a chess tutor for club players (1600-2200 Elo). \
Your job is to review one specific move in a position and give constructive criticism. \
Structure your answer in 3 sections: 1) Verdict on the move (excellent/good/average/bad), \
2) Better alternatives, 3) Teaching explanation. \
Be concise and actionable. Do not invent facts; if you are unsure, say so.";

pub fn system_prompt(context: &PromptContext) -> &'static str {
    match context.played_move {
        Some(_) => MOVE_SYSTEM,
        None => POSITION_SYSTEM,
    }
}

pub fn user_prompt(context: &PromptContext) -> String {
    let mut prompt = format!("Position (FEN): {}\n", context.fen);

    match &context.played_move {
        Some(mv) => {
            prompt.push_str(&format!("Move played: {}\n", mv));
            if let Some(eval) = &context.evaluation {
                prompt.push_str(&format!("Engine before the move: {}\n", eval.summary()));
            }
            prompt.push_str(
                "\nReview this move and give:\n\
                 1) A verdict (excellent/good/average/bad) with justification\n\
                 2) 2-3 better alternatives with explanations\n\
                 3) A teaching explanation of why the move is good or bad\n\n\
                 Be instructive and constructive.",
            );
        }
        None => {
            if let Some(eval) = &context.evaluation {
                prompt.push_str(&format!("Engine: {}\n", eval.summary()));
            }
            prompt.push_str(
                "\nAnalyze the position and give:\n\
                 1) Three possible plans (short, 1-2 lines each)\n\
                 2) Three questions to guide the learner\n\
                 3) A one-sentence summary\n\n\
                 Be instructive, not technical.",
            );
        }
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineEvaluation, Evaluation};

    #[test]
    fn test_position_prompt() {
        let context = PromptContext::position("8/8/8/8/8/8/8/8 w - - 0 1");
        assert_eq!(system_prompt(&context), POSITION_SYSTEM);
        let prompt = user_prompt(&context);
        assert!(prompt.starts_with("Position (FEN): 8/8/8/8/8/8/8/8 w - - 0 1\n"));
        assert!(prompt.contains("Three possible plans"));
        assert!(!prompt.contains("Engine"));
    }

    #[test]
    fn test_move_prompt_with_evaluation() {
        let context = PromptContext {
            fen: "fen".to_string(),
            played_move: Some("Nf3".to_string()),
            evaluation: Some(EngineEvaluation {
                best_move: "e2e4".to_string(),
                evaluation: Evaluation::Centipawns(25),
                principal_variation: vec!["e2e4".to_string()],
            }),
        };
        assert_eq!(system_prompt(&context), MOVE_SYSTEM);
        let prompt = user_prompt(&context);
        assert!(prompt.contains("Move played: Nf3\n"));
        assert!(prompt.contains("Engine before the move: Eval: +0.25"));
        assert!(prompt.contains("better alternatives"));
    }
}
