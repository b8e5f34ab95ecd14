use std::io::{self, BufRead, Stdout, StdinLock, Write};

use anyhow::{Context, Result};

use crate::error::TransitionError;
use crate::frontend::{QuizFrontend, UserAction};
use crate::session::{QuizResult, SessionSnapshot, SessionState};

/// 终端界面
///
/// 选项用编号作答，也可以直接输入选项文字。
pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
}

impl TerminalFrontend<StdinLock<'static>, Stdout> {
    /// 使用标准输入输出
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 取回输出（测试用）
    pub fn into_output(self) -> W {
        self.output
    }

    /// 读取一行，输入结束时返回 `None`
    fn read_line(&mut self) -> Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        let n = self.input.read_line(&mut line).context("无法读取输入")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn render_question(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let Some(question) = &snapshot.current_question else {
            return Ok(());
        };

        writeln!(self.output, "\n{}", "─".repeat(60))?;
        writeln!(
            self.output,
            "🧩 Caso {} ({}/{})",
            question.id(),
            snapshot.position().unwrap_or_default(),
            snapshot.total
        )?;
        writeln!(self.output, "Situación: {}", question.prompt())?;
        writeln!(self.output, "Selecciona la respuesta correcta:")?;
        for (i, option) in question.options().iter().enumerate() {
            writeln!(self.output, "  {}) {}", i + 1, option)?;
        }
        Ok(())
    }

    fn render_feedback(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(feedback) = &snapshot.last_feedback {
            if feedback.is_correct {
                writeln!(self.output, "✅ ¡Correcto! {}", feedback.justification)?;
            } else {
                writeln!(self.output, "❌ Incorrecto. {}", feedback.justification)?;
            }
        }

        if snapshot.is_last_question {
            writeln!(self.output, "[f] 🎯 Ver resultado final")?;
        } else {
            writeln!(self.output, "[n] ➡️ Siguiente pregunta")?;
        }
        Ok(())
    }

    fn render_result(&mut self, result: &QuizResult) -> Result<()> {
        writeln!(self.output, "\n🎯 Resultado Final")?;
        writeln!(
            self.output,
            "Tu puntuación: {}/{} ({:.1}%)",
            result.score, result.total, result.percentage
        )?;
        writeln!(self.output, "{}", result.message())?;
        writeln!(self.output, "[r] 🔁 Reiniciar cuestionario   [q] Salir")?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> QuizFrontend for TerminalFrontend<R, W> {
    fn render(&mut self, snapshot: &SessionSnapshot, result: Option<&QuizResult>) -> Result<()> {
        match snapshot.state {
            SessionState::Answering(_) => self.render_question(snapshot)?,
            SessionState::Answered(_) => self.render_feedback(snapshot)?,
            SessionState::Completed => {
                if let Some(result) = result {
                    self.render_result(result)?;
                }
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn show_error(&mut self, error: &TransitionError) -> Result<()> {
        writeln!(self.output, "⚠️ {}", error)?;
        Ok(())
    }

    fn next_action(&mut self, snapshot: &SessionSnapshot) -> Result<UserAction> {
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(UserAction::Quit);
            };

            match line.to_lowercase().as_str() {
                "q" | "salir" => return Ok(UserAction::Quit),
                "r" => return Ok(UserAction::Restart),
                _ => {}
            }

            match snapshot.state {
                SessionState::Answering(_) => {
                    if line.is_empty() {
                        continue;
                    }
                    let options = snapshot
                        .current_question
                        .as_ref()
                        .map(|q| q.options())
                        .unwrap_or_default();
                    let choice = line
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| options.get(i))
                        .cloned()
                        .unwrap_or(line);
                    return Ok(UserAction::Submit(choice));
                }
                SessionState::Answered(_) => match line.as_str() {
                    "" if snapshot.is_last_question => return Ok(UserAction::FinishEarly),
                    "f" => return Ok(UserAction::FinishEarly),
                    "" | "n" => return Ok(UserAction::Advance),
                    // 已作答后再次提交，交给会话返回 AlreadyAnswered
                    _ => return Ok(UserAction::Submit(line.clone())),
                },
                SessionState::Completed => {
                    writeln!(self.output, "[r] 🔁 Reiniciar cuestionario   [q] Salir")?;
                }
            }
        }
    }
}
