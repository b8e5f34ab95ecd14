use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use stat_test_quiz::models::{parse_bank, FileLoader, RemoteLoader, SourceFormat, StaticLoader};
use stat_test_quiz::utils::logging;
use stat_test_quiz::{
    App, AppError, Config, LoadError, QuestionBank, QuestionLoader, QuizFrontend, QuizResult,
    QuizSession, SessionSnapshot, SessionState, SourceKind, Tier, TransitionError, UserAction,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_test::{assert_err, assert_ok};

/// 一个不会有服务监听的地址（discard 端口）
const UNREACHABLE_URL: &str = "http://127.0.0.1:9/preguntas_psicologia.csv";

/// 按脚本依次返回操作的界面，脚本用完后退出
#[derive(Default)]
struct ScriptedFrontend {
    actions: VecDeque<UserAction>,
    rendered: Vec<SessionSnapshot>,
    results: Vec<QuizResult>,
    errors: Vec<TransitionError>,
}

impl ScriptedFrontend {
    fn new(actions: Vec<UserAction>) -> Self {
        Self {
            actions: actions.into(),
            ..Default::default()
        }
    }
}

impl QuizFrontend for ScriptedFrontend {
    fn render(
        &mut self,
        snapshot: &SessionSnapshot,
        result: Option<&QuizResult>,
    ) -> anyhow::Result<()> {
        self.rendered.push(snapshot.clone());
        if let Some(result) = result {
            self.results.push(result.clone());
        }
        Ok(())
    }

    fn show_error(&mut self, error: &TransitionError) -> anyhow::Result<()> {
        self.errors.push(error.clone());
        Ok(())
    }

    fn next_action(&mut self, _snapshot: &SessionSnapshot) -> anyhow::Result<UserAction> {
        Ok(self.actions.pop_front().unwrap_or(UserAction::Quit))
    }
}

async fn embedded_bank() -> Arc<QuestionBank> {
    Arc::new(assert_ok!(StaticLoader::embedded().load().await))
}

/// 在本地端口上返回一次固定的 HTTP 响应，返回题库地址
async fn serve_once(status: &str, body: &str) -> String {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}/preguntas_psicologia.csv", addr)
}

/// 第一个错误选项
fn wrong_option(session: &QuizSession) -> String {
    let q = session.current_question().unwrap();
    q.options()
        .iter()
        .find(|o| o.as_str() != q.correct_answer())
        .unwrap()
        .clone()
}

fn correct_option(session: &QuizSession) -> String {
    session.current_question().unwrap().correct_answer().to_string()
}

#[test]
fn test_two_correct_answers_is_excellent() {
    let text = "id,caso,opciones,respuesta_correcta,justificacion_correcta,justificacion_incorrecta1,justificacion_incorrecta2\n\
                1,Antes y después,ANOVA | Wilcoxon,Wilcoxon,Bien.,ANOVA no.,\n\
                2,Tres grupos,ANOVA | t de Student,ANOVA,Bien.,t no.,\n";
    let bank = Arc::new(assert_ok!(parse_bank(text, SourceFormat::Csv)));
    let mut session = QuizSession::new(bank);

    assert_ok!(session.submit_answer("Wilcoxon"));
    assert_ok!(session.advance());
    assert_ok!(session.submit_answer("ANOVA"));
    let snapshot = assert_ok!(session.advance());
    assert_eq!(snapshot.state, SessionState::Completed);

    let result = assert_ok!(session.result());
    assert_eq!(
        result,
        QuizResult {
            score: 2,
            total: 2,
            percentage: 100.0,
            tier: Tier::Excellent,
        }
    );
}

#[tokio::test]
async fn test_six_of_ten_is_good() {
    let mut session = QuizSession::new(embedded_bank().await);

    for i in 0..10 {
        let choice = if i < 6 {
            correct_option(&session)
        } else {
            wrong_option(&session)
        };
        assert_ok!(session.submit_answer(&choice));
        if i == 9 {
            assert_ok!(session.finish_early());
        } else {
            assert_ok!(session.advance());
        }
    }

    let result = assert_ok!(session.result());
    assert_eq!(result.score, 6);
    assert_eq!(result.total, 10);
    assert_eq!(result.percentage, 60.0);
    assert_eq!(result.tier, Tier::Good);
    assert!(result.percentage >= 0.0 && result.percentage <= 100.0);
}

#[tokio::test]
async fn test_unknown_choice_changes_nothing() {
    let mut session = QuizSession::new(embedded_bank().await);
    let before = session.snapshot();

    let err = assert_err!(session.submit_answer("Chi-cuadrado"));

    assert_eq!(
        err,
        TransitionError::InvalidChoice {
            choice: "Chi-cuadrado".to_string()
        }
    );
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.score(), 0);
}

#[tokio::test]
async fn test_unreachable_remote_source() {
    let loader = RemoteLoader::new(UNREACHABLE_URL).with_timeout(Duration::from_secs(2));

    let err = assert_err!(loader.load().await);

    assert!(matches!(err, LoadError::SourceUnreachable { .. }));
}

#[tokio::test]
async fn test_remote_http_error_is_unreachable() {
    let url = serve_once("404 Not Found", "no existe").await;

    let err = assert_err!(RemoteLoader::new(url).load().await);

    assert!(matches!(err, LoadError::SourceUnreachable { .. }));
}

#[tokio::test]
async fn test_remote_malformed_body_is_not_unreachable() {
    let url = serve_once("200 OK", "id,caso\n1,Sin opciones\n").await;

    let err = assert_err!(RemoteLoader::new(url).load().await);

    assert!(matches!(err, LoadError::MalformedRow { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_remote_loader_reads_csv_body() {
    let body = "id,caso,opciones,respuesta_correcta,justificacion_correcta,justificacion_incorrecta1\n\
                1,Tres grupos,ANOVA | t de Student,ANOVA,Bien.,t no.\n";
    let url = serve_once("200 OK", body).await;

    let bank = assert_ok!(RemoteLoader::new(url).load().await);

    assert_eq!(bank.size(), 1);
    assert_eq!(bank.get(0).unwrap().correct_answer(), "ANOVA");
}

#[tokio::test]
async fn test_wrong_answer_after_correct_first_option_uses_second_justification() {
    let mut session = QuizSession::new(embedded_bank().await);
    for _ in 0..3 {
        let choice = correct_option(&session);
        assert_ok!(session.submit_answer(&choice));
        assert_ok!(session.advance());
    }

    // Pearson | Spearman | ANOVA，正确答案 Pearson
    let snapshot = assert_ok!(session.submit_answer("Spearman"));

    let feedback = snapshot.last_feedback.unwrap();
    assert_eq!(feedback.question_id, 4);
    assert!(!feedback.is_correct);
    assert_eq!(
        feedback.justification,
        "Incorrecta: ANOVA compara medias, no correlaciones."
    );
}

#[tokio::test]
async fn test_initialize_fails_without_fallback() {
    let config = Config {
        source: SourceKind::Remote,
        remote_url: UNREACHABLE_URL.to_string(),
        remote_timeout_secs: 2,
        ..Config::default()
    };

    let err = assert_err!(App::initialize(config).await);

    assert!(matches!(err, AppError::Load(ref e) if e.is_unreachable()));
}

#[tokio::test]
async fn test_initialize_reports_incomplete_config() {
    let config = Config {
        source: SourceKind::File,
        quiz_file: None,
        ..Config::default()
    };

    let err = assert_err!(App::initialize(config).await);

    assert!(matches!(err, AppError::Config(_)));
}

#[tokio::test]
async fn test_initialize_falls_back_to_embedded_when_configured() {
    logging::init(false);
    let config = Config {
        source: SourceKind::Remote,
        remote_url: UNREACHABLE_URL.to_string(),
        remote_timeout_secs: 2,
        fallback_to_embedded: true,
        ..Config::default()
    };

    let app = assert_ok!(App::initialize(config).await);

    assert_eq!(app.bank().size(), 10);
}

#[tokio::test]
async fn test_file_loader_reads_toml() {
    let path = std::env::temp_dir().join(format!("stat_test_quiz_{}.toml", std::process::id()));
    let text = r#"
[[preguntas]]
id = 7
caso = "Impulsividad antes y después de taller (no normal)."
opciones = ["t de Student", "Mann-Whitney", "Wilcoxon"]
respuesta_correcta = "Wilcoxon"
justificacion_correcta = "Correcta: muestra relacionada no normal."
justificaciones_incorrectas = ["Incorrecta: t requiere normalidad.", "Incorrecta: Mann-Whitney es para grupos independientes."]
"#;
    tokio::fs::write(&path, text).await.unwrap();

    let bank = assert_ok!(FileLoader::new(&path).load().await);
    let _ = tokio::fs::remove_file(&path).await;

    assert_eq!(bank.size(), 1);
    let record = bank.get(0).unwrap();
    assert_eq!(record.id(), 7);
    assert_eq!(
        record.incorrect_justification_for("Mann-Whitney"),
        Some("Incorrecta: Mann-Whitney es para grupos independientes.")
    );
}

#[tokio::test]
async fn test_missing_file_is_unreachable() {
    let loader = FileLoader::new("/no/existe/preguntas.csv");

    let err = assert_err!(loader.load().await);

    assert!(err.is_unreachable());
}

#[tokio::test]
async fn test_run_reports_errors_and_restarts() {
    let bank = Arc::try_unwrap(embedded_bank().await).unwrap();
    let app = App::with_bank(Config::default(), bank);

    let mut actions = vec![
        // 还没作答就下一题
        UserAction::Advance,
        UserAction::Submit("ANOVA".to_string()),
        // 第二次提交无效
        UserAction::Submit("t de Student para muestras relacionadas".to_string()),
        UserAction::Advance,
    ];
    // 其余 9 题全部答对
    let answers = [
        "Mann-Whitney",
        "Wilcoxon",
        "Pearson",
        "Spearman",
        "ANOVA",
        "Wilcoxon",
        "t de Student independiente",
        "Spearman",
        "Kruskal-Wallis",
    ];
    for answer in answers {
        actions.push(UserAction::Submit(answer.to_string()));
        actions.push(UserAction::Advance);
    }
    actions.push(UserAction::Restart);

    let mut frontend = ScriptedFrontend::new(actions);
    let summary = assert_ok!(app.run(&mut frontend));

    assert_eq!(frontend.errors.len(), 2);
    assert!(matches!(
        frontend.errors[0],
        TransitionError::InvalidTransition { .. }
    ));
    assert_eq!(
        frontend.errors[1],
        TransitionError::AlreadyAnswered { index: 0 }
    );

    assert_eq!(summary.attempts, 1);
    let result = summary.last_result.unwrap();
    assert_eq!(result.score, 9);
    assert_eq!(result.tier, Tier::Excellent);
    assert_eq!(frontend.results, vec![result]);

    let last = frontend.rendered.last().unwrap();
    assert_eq!(last.state, SessionState::Answering(0));
    assert_eq!(last.score, 0);
}
