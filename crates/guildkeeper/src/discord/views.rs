//! Embeds, panels and modals rendered for the guild. All user-facing text is Russian.

use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use serenity::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter,
    CreateInputText, CreateMessage, CreateModal, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, InputTextStyle, ReactionType, Timestamp,
};

use crate::interaction::ComponentId;
use crate::markup::{self, TimestampStyle};
use crate::workflows::roles::{RoleCategory, RolePicker};
use crate::workflows::staff::{
    ApplicationFormSpec, ApplicationStats, DecisionNotice, FieldStyle, PositionRegistry,
    ReviewAudit, ReviewPost, StaffApplication, Verdict,
};

const ROLE_PANEL_COLOUR: u32 = 0x7289DA;
const STAFF_PANEL_COLOUR: u32 = 0x5865F2;
const SUCCESS_COLOUR: u32 = 0x00FF00;
const REJECT_COLOUR: u32 = 0xFF0000;
const CLEARED_COLOUR: u32 = 0xFF6B6B;

const REVIEW_FOOTER: &str = "Система набора";

pub const GENERIC_FAILURE: &str = "❌ Произошла ошибка при обработке запроса.";
pub const ROLE_PANELS_CREATED: &str =
    "✅ **Панели ролей успешно созданы!**\n📋 Пользователи теперь могут выбирать роли через выпадающие меню.";
pub const ROLE_PANELS_EMPTY: &str =
    "⚠️ **Ни одна роль не настроена.**\nПанели ролей не были созданы.";
pub const ROLE_PANELS_FAILED: &str = "❌ Произошла ошибка при создании панели ролей.";
pub const STAFF_PANEL_CREATED: &str =
    "✅ **Панель набора в стафф успешно создана!**\n📋 Пользователи теперь могут подавать заявки на должности.";
pub const STAFF_PANEL_FAILED: &str = "❌ Произошла ошибка при создании панели набора в стафф.";

fn embed_timestamp(at: DateTime<Utc>) -> Timestamp {
    Timestamp::from_unix_timestamp(at.timestamp()).unwrap_or_else(|_| Timestamp::now())
}

fn code_span(value: &str) -> String {
    format!("`{value}`")
}

pub fn role_panel(picker: &RolePicker, image_url: Option<&str>) -> CreateMessage {
    let (title, description, footer) = match picker.category {
        RoleCategory::Game => (
            "🎮 Игровые роли",
            "Под этим постом вы можете выбрать себе игровую роль, нажав на соответствующую роли кнопку в меню выбора.",
            "Система управления ролями",
        ),
        RoleCategory::Notification => (
            "🔔 Роли оповещений",
            "Под этим постом вы можете выбрать себе роль оповещений, нажав на соответствующую роли кнопку в меню выбора.",
            "Система уведомлений",
        ),
    };

    let mut embed = CreateEmbed::new()
        .title(title)
        .description(description)
        .colour(Colour::new(ROLE_PANEL_COLOUR))
        .footer(CreateEmbedFooter::new(footer))
        .timestamp(Timestamp::now());
    if picker.category == RoleCategory::Game {
        if let Some(url) = image_url {
            embed = embed.image(url);
        }
    }

    let options = picker
        .options
        .iter()
        .map(|option| {
            let item = CreateSelectMenuOption::new(option.label, option.value);
            match option.emoji {
                Some(emoji) => item.emoji(ReactionType::Unicode(emoji.to_string())),
                None => item,
            }
        })
        .collect();
    let menu = CreateSelectMenu::new(
        ComponentId::RolePicker(picker.category).to_string(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder("Выберите нужное!")
    .min_values(RolePicker::MIN_VALUES)
    .max_values(picker.max_values());

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::SelectMenu(menu)])
}

pub fn staff_panel(positions: &PositionRegistry, image_url: Option<&str>) -> CreateMessage {
    let listing = positions
        .iter()
        .map(|position| format!("{}\n*{}*", position.name, position.description))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut embed = CreateEmbed::new()
        .title("👥 Набор в стафф")
        .description(
            "💎 **Давно хотел быть частью сервера?** Проводить ивенты, следить за чатом, и т.п?\n💎 **Тогда ждём тебя в нашем дружном коллективе!**\n\n📋 Рассмотри должности ниже и выбери ту, что заинтересует тебя.",
        )
        .colour(Colour::new(STAFF_PANEL_COLOUR))
        .field("👥 Доступные позиции:", listing, false)
        .footer(CreateEmbedFooter::new("Система набора персонала"))
        .timestamp(Timestamp::now());
    if let Some(url) = image_url {
        embed = embed.image(url);
    }

    let options = positions
        .iter()
        .map(|position| {
            CreateSelectMenuOption::new(position.name, position.key)
                .description(position.description)
        })
        .collect();
    let menu = CreateSelectMenu::new(
        ComponentId::PositionPicker.to_string(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder("Выберите категорию!");

    CreateMessage::new()
        .embed(embed)
        .components(vec![CreateActionRow::SelectMenu(menu)])
}

pub fn application_modal(spec: &ApplicationFormSpec) -> CreateModal {
    let rows = spec
        .fields
        .iter()
        .map(|field| {
            let style = match field.style {
                FieldStyle::Short => InputTextStyle::Short,
                FieldStyle::Paragraph => InputTextStyle::Paragraph,
            };
            CreateActionRow::InputText(
                CreateInputText::new(style, field.label, field.id)
                    .required(field.required)
                    .max_length(field.max_length)
                    .placeholder(field.placeholder),
            )
        })
        .collect();

    let custom_id = ComponentId::ApplicationForm {
        position: spec.position.key.to_string(),
    };
    CreateModal::new(custom_id.to_string(), spec.title.clone()).components(rows)
}

/// Card shown to reviewers. Long answers are clipped to the embed field limit.
pub fn review_embed(application: &StaffApplication) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("📋 Новая заявка на должность")
        .colour(Colour::new(SUCCESS_COLOUR))
        .description("**Поступила новая заявка на рассмотрение**")
        .field(
            "👤 Кандидат",
            format!(
                "{}\n{}",
                markup::user_mention(application.user_id()),
                code_span(&application.applicant.display_name)
            ),
            true,
        )
        .field("💼 Должность", application.position_name.as_str(), true)
        .field("🆔 ID заявки", code_span(&application.id.0), true)
        .field("📝 Имя", markup::truncate_field(&application.name), true)
        .field("🎂 Возраст", markup::truncate_field(&application.age), true)
        .field(
            "⏰ Подана",
            markup::timestamp(application.submitted_at, TimestampStyle::Relative),
            true,
        )
        .field(
            "❓ Почему именно мы?",
            markup::truncate_field(&application.why_us),
            false,
        )
        .field(
            "🎯 Увлечения",
            markup::truncate_field(&application.hobbies),
            false,
        )
        .field(
            "💼 Опыт",
            markup::truncate_field(&application.experience),
            false,
        )
        .footer(CreateEmbedFooter::new(format!(
            "{REVIEW_FOOTER} • ID: {}",
            application.id
        )))
        .timestamp(embed_timestamp(application.submitted_at));
    if let Some(avatar) = &application.applicant.avatar_url {
        embed = embed.thumbnail(avatar);
    }
    embed
}

pub fn review_message(post: &ReviewPost) -> CreateMessage {
    let content = match post.mention {
        Some(role) => format!("🔔 **Новая заявка!** {}", markup::role_mention(role)),
        None => "🔔 **Новая заявка!**".to_string(),
    };

    let id = &post.application.id;
    let approve = CreateButton::new(
        ComponentId::Review {
            verdict: Verdict::Approved,
            application_id: id.clone(),
        }
        .to_string(),
    )
    .label("✅ Принять")
    .style(ButtonStyle::Success);
    let reject = CreateButton::new(
        ComponentId::Review {
            verdict: Verdict::Rejected,
            application_id: id.clone(),
        }
        .to_string(),
    )
    .label("❌ Отклонить")
    .style(ButtonStyle::Danger);

    CreateMessage::new()
        .content(content)
        .embed(review_embed(&post.application))
        .components(vec![CreateActionRow::Buttons(vec![approve, reject])])
}

/// Re-rendered card after a decision: recoloured, stamped, no controls.
pub fn closed_review_embed(audit: &ReviewAudit) -> CreateEmbed {
    let colour = if audit.verdict.is_approved() {
        SUCCESS_COLOUR
    } else {
        REJECT_COLOUR
    };
    review_embed(&audit.application)
        .colour(Colour::new(colour))
        .footer(CreateEmbedFooter::new(format!(
            "{REVIEW_FOOTER} • {} • {} • ID: {}",
            audit.verdict.stamp(),
            audit.reviewer.display_name,
            audit.application.id
        )))
}

pub fn submission_confirmation(application: &StaffApplication) -> CreateEmbed {
    CreateEmbed::new()
        .title("✅ Заявка успешно отправлена!")
        .colour(Colour::new(SUCCESS_COLOUR))
        .description(format!(
            "**Ваша заявка на должность {} принята к рассмотрению**",
            application.position_name
        ))
        .field("📋 ID заявки", code_span(&application.id.0), true)
        .field("💼 Должность", application.position_name.as_str(), true)
        .field(
            "⏰ Время подачи",
            markup::timestamp(application.submitted_at, TimestampStyle::LongDateTime),
            true,
        )
        .footer(CreateEmbedFooter::new("Ожидайте рассмотрения администрацией"))
        .timestamp(embed_timestamp(application.submitted_at))
}

pub fn decision_embed(notice: &DecisionNotice) -> CreateEmbed {
    let decided = markup::timestamp(notice.decided_at, TimestampStyle::LongDateTime);
    let embed = match notice.verdict {
        Verdict::Approved => {
            let mut description = format!(
                "**Добро пожаловать в команду!**\n\nВаша заявка на должность **{}** была успешно рассмотрена и одобрена нашей администрацией.",
                notice.position_name
            );
            if notice.role_granted {
                description.push_str("\n\n🎭 **Роль автоматически выдана!**");
            }
            CreateEmbed::new()
                .title("🎉 Поздравляем! Ваша заявка одобрена!")
                .colour(Colour::new(SUCCESS_COLOUR))
                .description(description)
        }
        Verdict::Rejected => CreateEmbed::new()
            .title("😔 Ваша заявка отклонена")
            .colour(Colour::new(REJECT_COLOUR))
            .description(format!(
                "К сожалению, ваша заявка на должность **{}** была отклонена нашей администрацией.",
                notice.position_name
            )),
    };

    let (time_label, footer) = match notice.verdict {
        Verdict::Approved => (
            "⏰ Время принятия",
            "Скоро с вами свяжется руководство для дальнейших инструкций",
        ),
        Verdict::Rejected => (
            "⏰ Время отклонения",
            "Не расстраивайтесь! Вы можете подать заявку повторно через некоторое время",
        ),
    };

    embed
        .field("📋 ID заявки", code_span(&notice.application_id.0), true)
        .field("💼 Должность", notice.position_name.as_str(), true)
        .field("👨‍💼 Рассмотрел", notice.reviewer_name.as_str(), true)
        .field(time_label, decided, false)
        .footer(CreateEmbedFooter::new(footer))
        .timestamp(embed_timestamp(notice.decided_at))
}

pub fn stats_embed(stats: &ApplicationStats, now: DateTime<Utc>) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("📊 Статистика заявок")
        .colour(Colour::new(SUCCESS_COLOUR))
        .field("📋 Всего активных заявок", stats.total.to_string(), true)
        .field(
            "⏰ Последнее обновление",
            markup::timestamp(now, TimestampStyle::Relative),
            true,
        );
    if !stats.is_empty() {
        embed = embed.field("📈 По должностям", stats.breakdown(), false);
    }
    embed
        .footer(CreateEmbedFooter::new("Статистика системы"))
        .timestamp(embed_timestamp(now))
}

pub fn cleared_embed(removed: usize) -> CreateEmbed {
    CreateEmbed::new()
        .title("🗑️ Заявки очищены")
        .description(format!("Успешно удалено **{removed}** заявок из памяти."))
        .colour(Colour::new(CLEARED_COLOUR))
        .footer(CreateEmbedFooter::new("Очистка данных системы"))
        .timestamp(Timestamp::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;
    use crate::workflows::staff::{Applicant, ApplicationId, PositionCount, Reviewer};
    use chrono::TimeZone;
    use serde_json::Value;

    fn application(why_us: &str) -> StaffApplication {
        StaffApplication {
            id: ApplicationId("1751371200000".to_string()),
            applicant: Applicant {
                user_id: UserId(7),
                username: "ann".to_string(),
                display_name: "Ann".to_string(),
                avatar_url: None,
            },
            position: "helper".to_string(),
            position_name: "👥 Хелпер".to_string(),
            name: "Ann".to_string(),
            age: "19".to_string(),
            why_us: why_us.to_string(),
            hobbies: "Y".to_string(),
            experience: "Не указано".to_string(),
            submitted_at: Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap(),
        }
    }

    fn json(embed: &CreateEmbed) -> Value {
        serde_json::to_value(embed).expect("embed serialises")
    }

    static MISSING: Value = Value::Null;

    fn field<'a>(embed: &'a Value, name: &str) -> &'a Value {
        embed["fields"]
            .as_array()
            .and_then(|fields| fields.iter().find(|field| field["name"] == name))
            .map(|field| &field["value"])
            .unwrap_or(&MISSING)
    }

    #[test]
    fn review_card_clips_long_answers() {
        let embed = json(&review_embed(&application(&"я".repeat(1500))));

        let why_us = field(&embed, "❓ Почему именно мы?")
            .as_str()
            .expect("why us rendered");
        assert_eq!(why_us.chars().count(), 1024);
        assert!(why_us.ends_with("..."));
        assert_eq!(field(&embed, "⏰ Подана"), "<t:1751371200:R>");
        assert_eq!(field(&embed, "👤 Кандидат"), "<@7>\n`Ann`");
        assert_eq!(embed["footer"]["text"], "Система набора • ID: 1751371200000");
    }

    #[test]
    fn closed_card_carries_verdict_and_reviewer() {
        let audit = ReviewAudit {
            application: application("X"),
            verdict: Verdict::Rejected,
            reviewer: Reviewer {
                user_id: UserId(42),
                display_name: "Админ".to_string(),
            },
            decided_at: Utc.with_ymd_and_hms(2025, 7, 1, 13, 0, 0).unwrap(),
        };

        let embed = json(&closed_review_embed(&audit));

        assert_eq!(
            embed["footer"]["text"],
            "Система набора • ❌ ОТКЛОНЕНО • Админ • ID: 1751371200000"
        );
    }

    #[test]
    fn approval_notice_mentions_the_granted_role() {
        let notice = DecisionNotice {
            verdict: Verdict::Approved,
            application_id: ApplicationId("1".to_string()),
            position_name: "👥 Хелпер".to_string(),
            reviewer_name: "Админ".to_string(),
            decided_at: Utc.with_ymd_and_hms(2025, 7, 1, 13, 0, 0).unwrap(),
            role_granted: true,
        };

        let embed = json(&decision_embed(&notice));

        assert_eq!(embed["title"], "🎉 Поздравляем! Ваша заявка одобрена!");
        assert!(embed["description"]
            .as_str()
            .is_some_and(|text| text.contains("🎭 **Роль автоматически выдана!**")));
        assert_eq!(field(&embed, "👨‍💼 Рассмотрел"), "Админ");
    }

    #[test]
    fn stats_breakdown_only_when_something_is_pending() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 13, 0, 0).unwrap();
        let empty = ApplicationStats {
            total: 0,
            by_position: Vec::new(),
        };
        assert_eq!(field(&json(&stats_embed(&empty, now)), "📈 По должностям"), &MISSING);

        let busy = ApplicationStats {
            total: 2,
            by_position: vec![PositionCount {
                key: "helper".to_string(),
                label: "👥 Хелпер".to_string(),
                count: 2,
            }],
        };
        let embed = json(&stats_embed(&busy, now));
        assert_eq!(field(&embed, "📋 Всего активных заявок"), "2");
        assert_eq!(field(&embed, "📈 По должностям"), "👥 Хелпер: **2**");
    }
}
