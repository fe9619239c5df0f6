//! Canned content served when the provider path cannot produce a usable result.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackTopic {
    BlogWriting,
    Technology,
    SoftwareDevelopment,
    General,
}

impl FallbackTopic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BlogWriting => "blog_writing",
            Self::Technology => "technology",
            Self::SoftwareDevelopment => "software_development",
            Self::General => "general",
        }
    }
}

#[derive(Debug)]
pub struct FallbackRule {
    pub topic: FallbackTopic,
    /// Lowercase keywords, matched as case-insensitive substrings.
    pub keywords: &'static [&'static str],
    pub content: &'static str,
}

impl FallbackRule {
    fn matches(&self, normalized_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_input.contains(keyword))
    }
}

const BLOG_WRITING_CONTENT: &str = "# Etkili Bir Blog Yazısı Nasıl Yazılır?

Blog yazmak, fikirlerinizi geniş kitlelerle paylaşmanın en güçlü yollarından biridir. İyi bir yazı, okuyucunun ihtiyacını anlamakla başlar.

## 1. Hedef Kitlenizi Tanıyın
Kime yazdığınızı bilmek; dilinizi, örneklerinizi ve yazının derinliğini belirler.

## 2. Dikkat Çekici Bir Başlık Seçin
Başlık, okuyucunun yazıya tıklayıp tıklamayacağına karar verdiği ilk yerdir. Net ve merak uyandırıcı olmalıdır.

## 3. Yapıyı Planlayın
Giriş, gelişme ve sonuç bölümlerini önceden belirleyin. Alt başlıklar ve kısa paragraflar okunabilirliği artırır.

## 4. Değer Katın
Somut örnekler, kişisel deneyimler ve uygulanabilir öneriler yazınızı akılda kalıcı kılar.

## Sonuç
Düzenli yazmak ve okuyucu geri bildirimlerini dikkate almak, zamanla kendi sesinizi bulmanızı sağlar.";

const TECHNOLOGY_CONTENT: &str = "# Teknoloji ve Yapay Zekanın Geleceği

Yapay zeka, günümüzde sağlıktan eğitime, finanstan ulaşıma kadar pek çok alanı dönüştürüyor.

## Yapay Zeka Nedir?
Yapay zeka, bilgisayar sistemlerinin öğrenme, akıl yürütme ve problem çözme gibi insan zekasına özgü görevleri yerine getirebilmesidir.

## Günlük Hayattaki Etkileri
- Kişiselleştirilmiş öneri sistemleri
- Sesli asistanlar ve otomatik çeviri
- Tıbbi görüntü analizi ve erken teşhis

## Fırsatlar ve Riskler
Verimlilik artışı ve yeni iş alanları önemli fırsatlar sunarken; veri gizliliği, önyargı ve şeffaflık konuları dikkatle ele alınmalıdır.

## Sonuç
Teknolojinin faydalarından en iyi şekilde yararlanmak için etik ilkeler ve sürekli öğrenme kültürü vazgeçilmezdir.";

const SOFTWARE_DEVELOPMENT_CONTENT: &str = "# Modern Yazılım Geliştirme Pratikleri

Yazılım geliştirme, yalnızca kod yazmaktan ibaret değildir; planlama, test ve sürekli iyileştirme süreçlerini de kapsar.

## Temiz Kod
Anlamlı isimlendirme, küçük fonksiyonlar ve tek sorumluluk ilkesi, kodun okunabilirliğini ve bakımını kolaylaştırır.

## Test ve Kalite
Birim testleri ve entegrasyon testleri, hataları erken yakalamanın en etkili yoludur.

## Web Geliştirme
Erişilebilirlik, performans ve güvenlik, modern web uygulamalarının temel kalite ölçütleridir.

## Sürekli Entegrasyon
Otomatik derleme ve dağıtım hatları, ekiplerin daha sık ve daha güvenli sürüm çıkarmasını sağlar.

## Sonuç
İyi yazılım, disiplinli alışkanlıkların ve ekip içi iş birliğinin ürünüdür.";

const GENERAL_CONTENT: &str = "# Konuya Genel Bir Bakış

Her konu, doğru sorularla ele alındığında yeni bakış açıları sunar. Bu yazıda konuyu temel başlıklar altında inceliyoruz.

## Arka Plan
Bir konuyu anlamanın ilk adımı, ortaya çıktığı bağlamı ve temel kavramlarını öğrenmektir.

## Önemli Noktalar
- Konunun günlük hayata etkileri
- Farklı bakış açıları ve tartışmalar
- Güncel gelişmeler ve eğilimler

## Pratik Öneriler
Güvenilir kaynaklardan okumak, not almak ve öğrendiklerinizi başkalarıyla paylaşmak kalıcı öğrenmeyi destekler.

## Sonuç
Merakla yaklaşılan her konu, kişisel ve mesleki gelişim için değerli bir fırsattır.";

static FALLBACK_RULES: [FallbackRule; 3] = [
    FallbackRule {
        topic: FallbackTopic::BlogWriting,
        keywords: &["blog", "yazı"],
        content: BLOG_WRITING_CONTENT,
    },
    FallbackRule {
        topic: FallbackTopic::Technology,
        keywords: &["teknoloji", "yapay zeka", "ai"],
        content: TECHNOLOGY_CONTENT,
    },
    // "yazılım" inputs also contain "yazı" and resolve to the blog rule above.
    FallbackRule {
        topic: FallbackTopic::SoftwareDevelopment,
        keywords: &["yazılım", "kod", "web"],
        content: SOFTWARE_DEVELOPMENT_CONTENT,
    },
];

static DEFAULT_RULE: FallbackRule = FallbackRule {
    topic: FallbackTopic::General,
    keywords: &[],
    content: GENERAL_CONTENT,
};

/// Ordered rules; the first match wins. The default rule is not part of the list.
pub fn fallback_rules() -> &'static [FallbackRule] {
    &FALLBACK_RULES
}

/// Length in characters of the shortest canned template, default included.
pub fn shortest_template_len() -> usize {
    fallback_rules()
        .iter()
        .chain(std::iter::once(&DEFAULT_RULE))
        .map(|rule| rule.content.chars().count())
        .min()
        .unwrap_or(0)
}

pub fn select_fallback_rule(input: &str) -> &'static FallbackRule {
    let normalized = input.to_lowercase();
    fallback_rules()
        .iter()
        .find(|rule| rule.matches(&normalized))
        .unwrap_or(&DEFAULT_RULE)
}

pub fn select_fallback_content(input: &str) -> &'static str {
    select_fallback_rule(input).content
}
