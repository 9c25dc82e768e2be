use crate::conversation::ConversationWindow;
use crate::language::Language;
use crate::models::{GenerationConfig, MessageRole};

/// Fixed reference text injected into every prompt. This is immutable
/// domain content, not user data; it must reach the provider verbatim
/// on every call.
pub const DOMAIN_KNOWLEDGE: &str = r#"
أنت مساعد ذكي متخصص في تعليم الصلاة الإسلامية والفقه الإسلامي. لديك معرفة شاملة ودقيقة بـ:

## أركان الصلاة السبعة:
1. النية (القصد بالقلب)
2. تكبيرة الإحرام (الله أكبر)
3. قراءة الفاتحة في كل ركعة
4. الركوع مع الطمأنينة
5. الرفع من الركوع مع الاعتدال
6. السجود على الأعضاء السبعة مع الطمأنينة
7. الرفع من السجود مع الجلوس مطمئناً
8. التسليم

## واجبات الصلاة الثمانية:
1. جميع التكبيرات غير تكبيرة الإحرام
2. قول "سمع الله لمن حمده" للإمام والمنفرد
3. قول "ربنا ولك الحمد" للجميع
4. قول "سبحان ربي العظيم" في الركوع
5. قول "سبحان ربي الأعلى" في السجود
6. قول "رب اغفر لي" بين السجدتين
7. التشهد الأول في الصلاة الثلاثية والرباعية
8. الجلوس للتشهد الأول والأخير

## سنن الصلاة:
- دعاء الاستفتاح، الاستعاذة، البسملة، القراءة بعد الفاتحة
- رفع اليدين عند التكبيرات، وضع اليدين على الصدر
- الأذكار والأدعية المسنونة

## شروط صحة الصلاة التسعة:
1. الإسلام
2. العقل
3. التمييز
4. رفع الحدث (الطهارة من الحدث الأصغر والأكبر)
5. إزالة النجاسة من البدن والثوب والمكان
6. ستر العورة
7. دخول الوقت
8. استقبال القبلة
9. النية

## أوقات الصلوات وعدد الركعات:
- الفجر: من طلوع الفجر الثاني حتى طلوع الشمس (2 ركعة)
- الظهر: من زوال الشمس حتى صيرورة ظل الشيء مثله (4 ركعات)
- العصر: من صيرورة ظل الشيء مثله حتى غروب الشمس (4 ركعات)
- المغرب: من غروب الشمس حتى مغيب الشفق الأحمر (3 ركعات)
- العشاء: من مغيب الشفق الأحمر حتى منتصف الليل (4 ركعات)

## أحكام الطهارة:
- الوضوء: فرائضه، سننه، مبطلاته
- الغسل: موجباته، كيفيته
- التيمم: شروطه، كيفيته

تعليمات مهمة للإجابة:
- أجب باللغة العربية الفصحى بأسلوب واضح ومبسط
- نظم المعلومات في نقاط مرقمة أو فقرات واضحة
- اذكر الأدلة الشرعية من القرآن والسنة عند الإمكان
- كن دقيقاً في المعلومات الفقهية وتجنب الخلافات المعقدة
- قدم أمثلة عملية تساعد على الفهم
- إذا كان السؤال خارج نطاق الصلاة، أجب بلطف وأرشد للتخصص
- استخدم تنسيقاً واضحاً مع فصل الفقرات بخطوط فارغة
"#;

/// Assembled model input for a single gateway invocation. Never
/// persisted; has no identity beyond the call it feeds.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub prompt: String,
    pub generation: GenerationConfig,
}

fn role_label(role: MessageRole, lang: Language) -> &'static str {
    match (role, lang) {
        (MessageRole::User, Language::Arabic) => "السائل",
        (MessageRole::Assistant, Language::Arabic) => "المساعد",
        (MessageRole::User, Language::English) => "Questioner",
        (MessageRole::Assistant, Language::English) => "Assistant",
        (MessageRole::User, Language::French) => "Demandeur",
        (MessageRole::Assistant, Language::French) => "Assistant",
        (MessageRole::User, Language::Spanish) => "Usuario",
        (MessageRole::Assistant, Language::Spanish) => "Asistente",
        (MessageRole::User, Language::German) => "Fragesteller",
        (MessageRole::Assistant, Language::German) => "Assistent",
    }
}

fn history_header(lang: Language) -> &'static str {
    match lang {
        Language::Arabic => "سياق المحادثة السابقة:",
        Language::English => "Previous conversation context:",
        Language::French => "Contexte de la conversation précédente :",
        Language::Spanish => "Contexto de la conversación anterior:",
        Language::German => "Bisheriger Gesprächskontext:",
    }
}

fn question_label(lang: Language) -> &'static str {
    match lang {
        Language::Arabic => "السؤال الحالي:",
        Language::English => "Current question:",
        Language::French => "Question actuelle :",
        Language::Spanish => "Pregunta actual:",
        Language::German => "Aktuelle Frage:",
    }
}

fn answer_label(lang: Language) -> &'static str {
    match lang {
        Language::Arabic => "الإجابة:",
        Language::English => "Answer:",
        Language::French => "Réponse :",
        Language::Spanish => "Respuesta:",
        Language::German => "Antwort:",
    }
}

/// Format/evidence/brevity directives appended after the question,
/// selected by detected language so the model answers in kind.
pub fn instruction_block(lang: Language) -> &'static str {
    match lang {
        Language::Arabic => {
            "يرجى تقديم إجابة مفيدة ودقيقة باللغة العربية مع مراعاة:\n\
             - استخدام تنسيق واضح مع فقرات منفصلة\n\
             - ترقيم الخطوات أو النقاط المهمة\n\
             - ذكر الأدلة الشرعية المناسبة\n\
             - الإيجاز مع الوضوح\n\
             - استخدام أمثلة عملية عند الحاجة"
        }
        Language::English => {
            "Please provide a helpful, accurate answer in English, keeping in mind:\n\
             - clear formatting with separated paragraphs\n\
             - numbered steps or key points\n\
             - relevant evidence from the Quran and Sunnah where appropriate\n\
             - brevity together with clarity\n\
             - practical examples where they help"
        }
        Language::French => {
            "Veuillez fournir une réponse utile et précise en français, en veillant à :\n\
             - une mise en forme claire avec des paragraphes séparés\n\
             - numéroter les étapes ou les points importants\n\
             - citer les preuves du Coran et de la Sunna lorsque c'est pertinent\n\
             - rester concis tout en étant clair\n\
             - donner des exemples pratiques si nécessaire"
        }
        Language::Spanish => {
            "Por favor, proporciona una respuesta útil y precisa en español, teniendo en cuenta:\n\
             - un formato claro con párrafos separados\n\
             - numerar los pasos o los puntos importantes\n\
             - citar las evidencias del Corán y la Sunna cuando corresponda\n\
             - ser breve sin perder claridad\n\
             - usar ejemplos prácticos cuando ayuden"
        }
        Language::German => {
            "Bitte gib eine hilfreiche, genaue Antwort auf Deutsch und achte dabei auf:\n\
             - klare Formatierung mit getrennten Absätzen\n\
             - nummerierte Schritte oder wichtige Punkte\n\
             - passende Belege aus Koran und Sunna, wo angebracht\n\
             - Kürze bei gleichzeitiger Klarheit\n\
             - praktische Beispiele, wo sie helfen"
        }
    }
}

/// Localized label identifying the answering service, returned in the
/// `source` field of successful responses.
pub fn source_label(lang: Language) -> &'static str {
    match lang {
        Language::Arabic => "مساعد ذكي متخصص في تعليم الصلاة",
        Language::English => "Smart assistant specialized in teaching prayer",
        Language::French => "Assistant intelligent spécialisé dans l'enseignement de la prière",
        Language::Spanish => "Asistente inteligente especializado en la enseñanza de la oración",
        Language::German => "Intelligenter Assistent für das Erlernen des Gebets",
    }
}

/// Assemble the full model input: fixed domain block, bounded history
/// rendered as labelled lines, language instructions, and the trimmed
/// current question. Pure string assembly over validated inputs; it
/// cannot fail.
pub fn compose(history: &ConversationWindow, question: &str, lang: Language) -> PromptRequest {
    let mut history_block = String::new();
    if !history.is_empty() {
        history_block.push_str("\n\n");
        history_block.push_str(history_header(lang));
        history_block.push('\n');
        for msg in history.iter() {
            history_block.push_str(role_label(msg.role, lang));
            history_block.push_str(": ");
            history_block.push_str(&msg.content);
            history_block.push('\n');
        }
    }

    let prompt = format!(
        "{context}\n{history}\n{q_label} {question}\n\n{instructions}\n\n{a_label}",
        context = DOMAIN_KNOWLEDGE,
        history = history_block,
        q_label = question_label(lang),
        question = question.trim(),
        instructions = instruction_block(lang),
        a_label = answer_label(lang),
    );

    PromptRequest {
        prompt,
        generation: GenerationConfig::default(),
    }
}
