use http::StatusCode;

use crate::error::AssistantError;
use crate::language::Language;

/// User-facing failure taxonomy. Every failure the service can
/// produce maps onto exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyQuestion,
    QuestionTooLong,
    RateLimited,
    Configuration,
    Quota,
    Network,
    Timeout,
    Policy,
    Unknown,
}

/// Classified failure: transport status plus the localized message the
/// client renders in place of an answer.
#[derive(Debug, Clone)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub message: String,
}

/// Map a failure onto a status code and a localized message. Total:
/// this never fails, so the endpoint can always respond.
pub fn classify(error: &AssistantError, lang: Language) -> ClassifiedError {
    let kind = kind_of(error);
    ClassifiedError {
        kind,
        status: status_of(kind),
        message: message_for(kind, lang).to_string(),
    }
}

fn kind_of(error: &AssistantError) -> ErrorKind {
    match error {
        AssistantError::EmptyQuestion => ErrorKind::EmptyQuestion,
        AssistantError::QuestionTooLong(_) => ErrorKind::QuestionTooLong,
        AssistantError::RateLimited(_) => ErrorKind::RateLimited,
        AssistantError::Configuration(_) => ErrorKind::Configuration,
        AssistantError::Timeout(_) => ErrorKind::Timeout,
        AssistantError::PolicyBlocked(_) => ErrorKind::Policy,
        AssistantError::EmptyResponse => ErrorKind::Unknown,
        AssistantError::Http(e) => {
            if e.is_timeout() {
                ErrorKind::Timeout
            } else {
                ErrorKind::Network
            }
        }
        other => kind_from_description(&other.to_string()),
    }
}

/// Heuristic fallback over the lowercased diagnostic, checked in fixed
/// priority order. Covers provider-reported errors whose cause only
/// shows up in the message text.
fn kind_from_description(detail: &str) -> ErrorKind {
    let msg = detail.to_lowercase();
    if msg.contains("api_key") || msg.contains("api key") || msg.contains("credential") {
        ErrorKind::Configuration
    } else if msg.contains("quota") || msg.contains("limit") {
        ErrorKind::Quota
    } else if msg.contains("network") || msg.contains("fetch") || msg.contains("connection") {
        ErrorKind::Network
    } else if msg.contains("timeout") || msg.contains("timed out") {
        ErrorKind::Timeout
    } else if msg.contains("safety") || msg.contains("policy") {
        ErrorKind::Policy
    } else {
        ErrorKind::Unknown
    }
}

fn status_of(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::EmptyQuestion | ErrorKind::QuestionTooLong | ErrorKind::Policy => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::RateLimited | ErrorKind::Quota => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Network => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Timeout => StatusCode::REQUEST_TIMEOUT,
        ErrorKind::Configuration | ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Pre-translated message per kind and language. The match is
/// exhaustive on both axes so a missing translation fails to compile
/// instead of silently falling back at runtime.
fn message_for(kind: ErrorKind, lang: Language) -> &'static str {
    use ErrorKind::*;
    use Language::*;
    match (kind, lang) {
        (EmptyQuestion, Arabic) => "يرجى إدخال سؤال صحيح",
        (EmptyQuestion, English) => "Please enter a valid question",
        (EmptyQuestion, French) => "Veuillez saisir une question valide",
        (EmptyQuestion, Spanish) => "Por favor, introduce una pregunta válida",
        (EmptyQuestion, German) => "Bitte gib eine gültige Frage ein",

        (QuestionTooLong, Arabic) => "السؤال طويل جداً. يرجى تقصيره إلى أقل من 1000 حرف",
        (QuestionTooLong, English) => {
            "The question is too long. Please shorten it to under 1000 characters"
        }
        (QuestionTooLong, French) => {
            "La question est trop longue. Veuillez la raccourcir à moins de 1000 caractères"
        }
        (QuestionTooLong, Spanish) => {
            "La pregunta es demasiado larga. Por favor, acórtala a menos de 1000 caracteres"
        }
        (QuestionTooLong, German) => {
            "Die Frage ist zu lang. Bitte kürze sie auf unter 1000 Zeichen"
        }

        (RateLimited, Arabic) => "تم تجاوز حد الطلبات. يرجى الانتظار قليلاً والمحاولة مرة أخرى",
        (RateLimited, English) => "Too many requests. Please wait a moment and try again",
        (RateLimited, French) => "Trop de requêtes. Veuillez patienter un instant et réessayer",
        (RateLimited, Spanish) => "Demasiadas solicitudes. Espera un momento e inténtalo de nuevo",
        (RateLimited, German) => "Zu viele Anfragen. Bitte warte einen Moment und versuche es erneut",

        (Configuration, Arabic) => "خطأ في إعدادات الخدمة. يرجى التحقق من الإعدادات",
        (Configuration, English) => "Service configuration error. Please check the settings",
        (Configuration, French) => "Erreur de configuration du service. Veuillez vérifier les paramètres",
        (Configuration, Spanish) => "Error de configuración del servicio. Por favor, revisa la configuración",
        (Configuration, German) => "Fehler in der Dienstkonfiguration. Bitte überprüfe die Einstellungen",

        (Quota, Arabic) => "تم تجاوز حد الاستخدام المسموح. يرجى المحاولة بعد قليل",
        (Quota, English) => "The allowed usage limit was exceeded. Please try again shortly",
        (Quota, French) => "La limite d'utilisation autorisée a été dépassée. Veuillez réessayer dans un instant",
        (Quota, Spanish) => "Se superó el límite de uso permitido. Por favor, inténtalo de nuevo en un momento",
        (Quota, German) => "Das zulässige Nutzungslimit wurde überschritten. Bitte versuche es gleich erneut",

        (Network, Arabic) => "خطأ في الاتصال بالخادم. يرجى التحقق من الإنترنت والمحاولة مرة أخرى",
        (Network, English) => "Connection error. Please check your internet and try again",
        (Network, French) => "Erreur de connexion au serveur. Veuillez vérifier votre connexion Internet et réessayer",
        (Network, Spanish) => "Error de conexión con el servidor. Comprueba tu conexión a Internet e inténtalo de nuevo",
        (Network, German) => "Verbindungsfehler zum Server. Bitte überprüfe deine Internetverbindung und versuche es erneut",

        (Timeout, Arabic) => "انتهت مهلة الاستجابة. يرجى المحاولة مرة أخرى",
        (Timeout, English) => "The response timed out. Please try again",
        (Timeout, French) => "Le délai de réponse a expiré. Veuillez réessayer",
        (Timeout, Spanish) => "Se agotó el tiempo de respuesta. Por favor, inténtalo de nuevo",
        (Timeout, German) => "Die Antwortzeit ist abgelaufen. Bitte versuche es erneut",

        (Policy, Arabic) => "عذراً، لا يمكنني الإجابة على هذا السؤال. يرجى إعادة صياغته",
        (Policy, English) => "Sorry, I cannot answer this question. Please rephrase it",
        (Policy, French) => "Désolé, je ne peux pas répondre à cette question. Veuillez la reformuler",
        (Policy, Spanish) => "Lo siento, no puedo responder a esta pregunta. Por favor, reformúlala",
        (Policy, German) => "Entschuldigung, ich kann diese Frage nicht beantworten. Bitte formuliere sie um",

        (Unknown, Arabic) => "عذراً، حدث خطأ في الخدمة. يرجى المحاولة لاحقاً",
        (Unknown, English) => "Sorry, a service error occurred. Please try again later",
        (Unknown, French) => "Désolé, une erreur de service s'est produite. Veuillez réessayer plus tard",
        (Unknown, Spanish) => "Lo sentimos, ocurrió un error del servicio. Por favor, inténtalo más tarde",
        (Unknown, German) => "Entschuldigung, es ist ein Dienstfehler aufgetreten. Bitte versuche es später erneut",
    }
}
